mod actions;
mod effects;
mod phase;

use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use crate::cards::Catalog;
use crate::config::MatchConfig;
use crate::engine::{apply_intent, Intent};
use crate::phase::{MatchPhase, TurnPhase};
use crate::state::{MatchState, TurnState};
use crate::types::*;

// ==========================================
// HELPER FUNCTIONS (Boilerplate Reduction)
// ==========================================

fn forward(id: u32, power: i32) -> AthleteCard {
    AthleteCard::new(CardId(id), "Forward", Role::Forward, power)
}

fn midfielder(id: u32, power: i32) -> AthleteCard {
    AthleteCard::new(CardId(id), "Midfielder", Role::Midfielder, power)
}

fn defender(id: u32, power: i32) -> AthleteCard {
    AthleteCard::new(CardId(id), "Defender", Role::Defender, power)
}

/// A card allowed in every zone
fn utility(id: u32, power: i32) -> AthleteCard {
    AthleteCard::new(CardId(id), "Utility", Role::Midfielder, power).with_zones(&[0, 1, 2, 3])
}

fn synergy(id: u32, synergy_type: SynergyType, stars: i32) -> SynergyCard {
    SynergyCard::new(SynergyId(id), "Synergy", synergy_type, stars)
}

fn test_deck() -> Vec<SynergyCard> {
    vec![
        synergy(1, SynergyType::Attack, 1),
        synergy(2, SynergyType::Attack, 2),
        synergy(3, SynergyType::Defense, 1),
        synergy(4, SynergyType::Defense, 2),
        synergy(5, SynergyType::Special, 2),
        synergy(6, SynergyType::Tackle, 1),
        synergy(7, SynergyType::Tackle, 2),
        synergy(8, SynergyType::SetPiece, 3),
        synergy(9, SynergyType::Attack, 3),
        synergy(10, SynergyType::Defense, 3),
    ]
}

/// Default rules without printed field icons, so only card pairings count.
fn plain_config() -> MatchConfig {
    MatchConfig {
        field_icons: Vec::new(),
        ..MatchConfig::default()
    }
}

/// Match where every listed card starts in its side's hand.
fn build_match(
    home: Vec<AthleteCard>,
    home_bench: Vec<AthleteCard>,
    away: Vec<AthleteCard>,
    config: MatchConfig,
) -> MatchState {
    let ids = |cards: &[AthleteCard]| cards.iter().map(|c| c.id).collect::<Vec<_>>();
    let home_squad = Squad {
        starters: ids(&home),
        bench: ids(&home_bench),
    };
    let away_squad = Squad {
        starters: ids(&away),
        bench: Vec::new(),
    };

    let mut all = home;
    all.extend(home_bench);
    all.extend(away);
    let catalog = Arc::new(Catalog::new(all, test_deck()));
    MatchState::new(catalog, config, home_squad, away_squad, 7).expect("squads are valid")
}

/// Put a card straight onto a grid, bypassing the placement rules.
fn put(state: &mut MatchState, side: Side, card: u32, zone: u8, start: u8) {
    state.field.grid_mut(side).place(CardId(card), zone, start);
    state.side_mut(side).hand.retain(|c| *c != CardId(card));
}

/// Jump into the first half with `side` on the ball in `turn_phase`.
fn acting(mut state: MatchState, side: Side, turn_phase: TurnPhase) -> MatchState {
    state.phase = MatchPhase::FirstHalf;
    state.turn = 2;
    state.current_side = side;
    state.turn_phase = turn_phase;
    state.turn_state = TurnState::default();
    state
}

fn apply(state: &MatchState, intent: Intent) -> MatchState {
    match apply_intent(state, &intent) {
        Ok(next) => next,
        Err(e) => panic!("{:?} rejected: {}", intent, e),
    }
}

/// Advance the pending duel until it is cleared.
fn resolve_duel(mut state: MatchState) -> MatchState {
    let mut steps = 0;
    while state.duel.is_some() {
        state = apply(&state, Intent::AdvanceDuel);
        steps += 1;
        assert!(steps <= 10, "duel did not finish");
    }
    state
}

/// Drive both sides with the AI until the match is over.
fn play_out(mut state: MatchState, max_intents: usize) -> (MatchState, Vec<Intent>) {
    let mut history = Vec::new();
    while let Some(side) = state.acting_side() {
        let intent = crate::ai::choose_intent(&state, side).expect("ai always has a move");
        state = apply(&state, intent.clone());
        history.push(intent);
        assert!(history.len() <= max_intents, "match did not finish");
    }
    (state, history)
}
