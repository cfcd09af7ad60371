use super::*;
use crate::actions::TeamAction;
use crate::engine::MatchEngine;
use crate::error::GameError;
use crate::phase::{accepts, IntentKind};

fn every_intent() -> Vec<Intent> {
    vec![
        Intent::KickOff,
        Intent::PlaceCard {
            card: CardId(1),
            zone: 3,
            slot: 0,
        },
        Intent::TeamAction {
            action: TeamAction::Pass,
        },
        Intent::PlaySynergy {
            synergy: SynergyId(1),
        },
        Intent::ChooseSynergy {
            synergy: SynergyId(1),
        },
        Intent::Shoot {
            card: CardId(1),
            zone: 3,
            slot: 0,
        },
        Intent::AdvanceDuel,
        Intent::Substitute {
            incoming: CardId(2),
            outgoing: CardId(1),
            zone: 3,
            slot: 0,
        },
        Intent::EndTurn,
        Intent::TakePenalty { card: CardId(1) },
    ]
}

fn two_card_match() -> MatchState {
    build_match(vec![defender(1, 3)], vec![defender(2, 3)], vec![defender(21, 3)], plain_config())
}

fn in_match_phase(phase: MatchPhase) -> MatchState {
    let mut state = acting(two_card_match(), Side::Home, TurnPhase::PlayerAction);
    put(&mut state, Side::Home, 1, 3, 3);
    state.phase = phase;
    state
}

#[test]
fn test_rejected_intents_leave_state_unchanged() {
    let snapshots = [
        two_card_match(),
        acting(two_card_match(), Side::Home, TurnPhase::TeamAction),
        acting(two_card_match(), Side::Home, TurnPhase::PlayerAction),
        acting(two_card_match(), Side::Away, TurnPhase::Shooting),
        in_match_phase(MatchPhase::HalfTime),
        in_match_phase(MatchPhase::Penalty),
        in_match_phase(MatchPhase::FullTime),
    ];

    for state in snapshots {
        for intent in every_intent() {
            let kind = intent.kind();
            if accepts(state.phase, state.turn_phase, kind) {
                continue;
            }
            let mut engine = MatchEngine::new(state.clone());
            assert_eq!(
                engine.submit(intent).map(|_| ()),
                Err(GameError::WrongPhase { intent: kind })
            );
            assert_eq!(engine.state(), &state);
            assert!(engine.history().is_empty());
        }
    }
}

#[test]
fn test_full_time_rejects_everything() {
    let state = in_match_phase(MatchPhase::FullTime);
    let mut engine = MatchEngine::new(state.clone());
    for intent in every_intent() {
        let kind = intent.kind();
        assert_eq!(engine.submit(intent).map(|_| ()), Err(GameError::WrongPhase { intent: kind }));
    }
    assert_eq!(engine.state(), &state);
}

#[test]
fn test_whitelists_per_turn_phase() {
    assert!(TurnPhase::TeamAction.can_perform_team_action());
    assert!(TurnPhase::TeamAction.can_end_turn());
    assert!(!TurnPhase::TeamAction.can_place_card());

    assert!(TurnPhase::PlayerAction.can_place_card());
    assert!(TurnPhase::PlayerAction.can_shoot());
    assert!(TurnPhase::PlayerAction.can_substitute());
    assert!(!TurnPhase::PlayerAction.can_advance_duel());

    assert!(TurnPhase::Shooting.can_advance_duel());
    assert!(!TurnPhase::Shooting.can_end_turn());
    assert!(!TurnPhase::Shooting.can_shoot());
}

#[test]
fn test_match_phase_gates() {
    for kind in [IntentKind::PlaceCard, IntentKind::EndTurn, IntentKind::TakePenalty] {
        assert!(!accepts(MatchPhase::Draft, TurnPhase::PlayerAction, kind));
        assert!(!accepts(MatchPhase::HalfTime, TurnPhase::PlayerAction, kind));
    }
    assert!(accepts(MatchPhase::Draft, TurnPhase::Start, IntentKind::KickOff));
    assert!(accepts(MatchPhase::Penalty, TurnPhase::End, IntentKind::TakePenalty));
    assert!(!accepts(MatchPhase::Penalty, TurnPhase::End, IntentKind::KickOff));
    assert!(!accepts(MatchPhase::FullTime, TurnPhase::End, IntentKind::KickOff));
}

#[test]
fn test_turn_flow_through_both_halves() {
    let config = MatchConfig {
        turns_per_half: 2,
        penalties_on_draw: false,
        ..plain_config()
    };
    let state = build_match(vec![defender(1, 3)], vec![], vec![defender(21, 3)], config);

    let state = apply(&state, Intent::KickOff);
    assert_eq!(state.phase, MatchPhase::FirstHalf);
    assert_eq!(state.current_side, Side::Home);
    assert_eq!(state.turn, 1);
    assert!(state.is_first_turn());
    // Nothing to pass or press with on the opening turn
    assert_eq!(state.turn_phase, TurnPhase::PlayerAction);
    assert_eq!(state.home.synergy_hand.len(), 2);
    assert_eq!(state.away.synergy_hand.len(), 2);

    let state = apply(&state, Intent::EndTurn);
    assert_eq!(state.current_side, Side::Away);
    assert_eq!(state.turn, 2);
    assert!(!state.is_first_turn());
    assert_eq!(state.turn_phase, TurnPhase::TeamAction);

    let state = apply(
        &state,
        Intent::TeamAction {
            action: TeamAction::Press,
        },
    );
    assert_eq!(state.turn_phase, TurnPhase::PlayerAction);

    let state = apply(&state, Intent::EndTurn);
    assert_eq!(state.phase, MatchPhase::HalfTime);

    let state = apply(&state, Intent::KickOff);
    assert_eq!(state.phase, MatchPhase::SecondHalf);
    assert_eq!(state.current_side, Side::Away);
    assert_eq!(state.turn, 1);
    assert_eq!(state.turn_phase, TurnPhase::TeamAction);

    let state = apply(&state, Intent::EndTurn);
    let state = apply(&state, Intent::EndTurn);
    assert_eq!(state.phase, MatchPhase::FullTime);
    assert!(state.is_over());
    assert_eq!(state.acting_side(), None);
}

#[test]
fn test_pending_choice_blocks_other_intents() {
    let mut state = acting(two_card_match(), Side::Home, TurnPhase::PlayerAction);
    state.pending_choice = Some(crate::state::SynergyChoice {
        side: Side::Home,
        options: vec![synergy(11, SynergyType::Attack, 1), synergy(12, SynergyType::Attack, 2)],
    });

    assert_eq!(
        apply_intent(&state, &Intent::EndTurn).map(|_| ()),
        Err(GameError::ChoicePending)
    );
    let chosen = apply(
        &state,
        Intent::ChooseSynergy {
            synergy: SynergyId(12),
        },
    );
    assert!(chosen.pending_choice.is_none());
}
