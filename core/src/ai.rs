//! Computer opponent
//!
//! A deterministic, rule-of-thumb policy. `choose_intent` only reads the
//! snapshot and proposes one intent for `side`; the caller submits it like any
//! other intent.

use alloc::vec::Vec;
use core::cmp::Reverse;

use crate::actions::TeamAction;
use crate::duel::{attack_power_with, DuelPhase};
use crate::engine::Intent;
use crate::field::Placement;
use crate::penalties::{available_takers, kick_power};
use crate::phase::{MatchPhase, TurnPhase};
use crate::placement::validate_placement;
use crate::state::MatchState;
use crate::types::{AthleteCard, CardId, IconKind, Role, Side, SynergyCard, SynergyType};

/// Slots tried for a placement, centre first.
const SLOT_ORDER: [u8; 7] = [3, 2, 4, 1, 5, 0, 6];

/// Preferred local zones per role, best first.
fn preferred_zones(role: Role) -> &'static [u8] {
    match role {
        Role::Forward => &[0, 1],
        Role::Midfielder => &[1, 2, 0],
        Role::Defender => &[3, 2],
    }
}

/// Next intent for `side`, or `None` when it is not `side`'s move.
pub fn choose_intent(state: &MatchState, side: Side) -> Option<Intent> {
    match state.phase {
        MatchPhase::FullTime => None,
        MatchPhase::Draft | MatchPhase::HalfTime => {
            (side == state.current_side).then_some(Intent::KickOff)
        }
        MatchPhase::Penalty => choose_penalty_taker(state, side),
        MatchPhase::FirstHalf | MatchPhase::SecondHalf => choose_in_play(state, side),
    }
}

fn choose_in_play(state: &MatchState, side: Side) -> Option<Intent> {
    if let Some(choice) = &state.pending_choice {
        if choice.side != side {
            return None;
        }
        return best_synergy(choice.options.iter(), |_| true)
            .map(|synergy| Intent::ChooseSynergy { synergy: synergy.id });
    }

    if let Some(duel) = &state.duel {
        if duel.phase == DuelPhase::DefenderSynergySelection {
            if side != duel.defending_side() {
                return None;
            }
            let team = state.side(side);
            if team.active_synergies.len() < state.config.max_duel_synergies as usize {
                if let Some(synergy) =
                    best_synergy(team.synergy_hand.iter(), SynergyType::usable_by_defender)
                {
                    return Some(Intent::PlaySynergy { synergy: synergy.id });
                }
            }
            return Some(Intent::AdvanceDuel);
        }
        return (side == duel.attacker_side).then_some(Intent::AdvanceDuel);
    }

    if side != state.current_side {
        return None;
    }
    match state.turn_phase {
        TurnPhase::TeamAction => Some(Intent::TeamAction {
            action: choose_team_action(state, side),
        }),
        TurnPhase::PlayerAction => Some(
            choose_placement(state, side)
                .or_else(|| choose_shot(state, side))
                .unwrap_or(Intent::EndTurn),
        ),
        _ => None,
    }
}

/// Highest stars first, lowest id on ties.
fn best_synergy<'a>(
    cards: impl Iterator<Item = &'a SynergyCard>,
    allowed: impl Fn(SynergyType) -> bool,
) -> Option<&'a SynergyCard> {
    cards
        .filter(|card| allowed(card.synergy_type))
        .max_by_key(|card| (card.stars, Reverse(card.id)))
}

fn choose_team_action(state: &MatchState, side: Side) -> TeamAction {
    let counts = *state.icon_report().for_side(side);
    let hand_has_room =
        state.side(side).synergy_hand.len() < state.config.synergy_hand_limit as usize;
    let can_draw = !state.synergy_deck.is_empty() && hand_has_room;
    if can_draw && counts.get(IconKind::Pass) >= counts.get(IconKind::Press) {
        TeamAction::Pass
    } else {
        TeamAction::Press
    }
}

fn choose_placement(state: &MatchState, side: Side) -> Option<Intent> {
    if state.turn_state.placements_made >= state.config.placements_per_turn {
        return None;
    }
    let grid = state.field.grid(side);
    let first = grid.is_empty();

    let mut hand: Vec<&AthleteCard> = state
        .side(side)
        .hand
        .iter()
        .filter_map(|id| state.catalog.athlete(*id))
        .collect();
    hand.sort_by_key(|card| (Reverse(card.base_power), card.id));

    for card in hand {
        let preferred = preferred_zones(card.role);
        let others = card.zones.zones().into_iter().filter(|z| !preferred.contains(z));
        let zones = preferred.iter().copied().chain(others);
        for zone in zones {
            for slot in SLOT_ORDER {
                if validate_placement(card, grid, zone, slot, first).is_ok() {
                    return Some(Intent::PlaceCard {
                        card: card.id,
                        zone,
                        slot,
                    });
                }
            }
        }
    }
    None
}

/// Fielded cards that may shoot right now.
fn shooters(state: &MatchState, side: Side) -> impl Iterator<Item = Placement> + '_ {
    let budget_left = state.turn_state.shots_taken < state.config.shots_per_turn;
    let bonus = state.turn_state.bonus_shot;
    state
        .field
        .grid(side)
        .placements()
        .into_iter()
        .filter(move |p| budget_left || bonus == Some(p.card))
        .filter(move |p| state.next_unused_attack_index(side, p.card).is_some())
}

fn choose_shot(state: &MatchState, side: Side) -> Option<Intent> {
    let report = state.icon_report();
    let (power, shooter) = shooters(state, side)
        .map(|p| (attack_power_with(state, &report, side, p.card), p))
        .max_by_key(|(power, p)| (*power, Reverse(p.card)))?;

    if power < state.config.ai_shot_threshold {
        return None;
    }

    let team = state.side(side);
    if team.active_synergies.is_empty() && state.config.max_duel_synergies > 0 {
        if let Some(synergy) = best_synergy(team.synergy_hand.iter(), SynergyType::usable_by_attacker) {
            return Some(Intent::PlaySynergy { synergy: synergy.id });
        }
    }
    Some(Intent::Shoot {
        card: shooter.card,
        zone: shooter.zone,
        slot: shooter.start,
    })
}

fn choose_penalty_taker(state: &MatchState, side: Side) -> Option<Intent> {
    let shootout = state.shootout.as_ref()?;
    if shootout.finished || shootout.next_side() != side {
        return None;
    }
    available_takers(state, side)
        .into_iter()
        .max_by_key(|card: &CardId| (kick_power(state, *card), Reverse(*card)))
        .map(|card| Intent::TakePenalty { card })
}
