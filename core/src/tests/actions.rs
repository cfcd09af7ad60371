use super::*;
use crate::actions::TeamAction;
use crate::error::GameError;
use crate::match_log::LogKind;

/// Two back-line cards completing one middle and one seam icon of `kind`.
fn back_pair(left: u32, right: u32, kind: IconKind) -> Vec<AthleteCard> {
    vec![
        defender(left, 3)
            .with_icon(IconPosition::RightMiddle, kind)
            .with_icon(IconPosition::RightBottom, kind),
        defender(right, 3)
            .with_icon(IconPosition::LeftMiddle, kind)
            .with_icon(IconPosition::LeftBottom, kind),
    ]
}

fn with_pair(kind: IconKind, config: MatchConfig) -> MatchState {
    let mut state = build_match(back_pair(1, 2, kind), vec![], back_pair(21, 22, kind), config);
    put(&mut state, Side::Home, 1, 3, 0);
    put(&mut state, Side::Home, 2, 3, 2);
    put(&mut state, Side::Away, 21, 3, 0);
    put(&mut state, Side::Away, 22, 3, 2);
    state
}

fn pass() -> Intent {
    Intent::TeamAction {
        action: TeamAction::Pass,
    }
}

fn press() -> Intent {
    Intent::TeamAction {
        action: TeamAction::Press,
    }
}

#[test]
fn test_pass_draws_per_icon() {
    let state = acting(with_pair(IconKind::Pass, plain_config()), Side::Home, TurnPhase::TeamAction);
    assert_eq!(state.icon_report().home.pass, 2);

    let next = apply(&state, pass());
    assert_eq!(next.home.synergy_hand.len(), 2);
    assert_eq!(next.synergy_deck.len(), 8);
    assert_eq!(next.home.synergy_hand[..], state.synergy_deck[..2]);
    assert_eq!(next.turn_phase, TurnPhase::PlayerAction);
    assert_eq!(next.log.last().map(|e| e.kind), Some(LogKind::TeamAction));
}

#[test]
fn test_pass_capped_by_hand_and_deck() {
    let config = MatchConfig {
        synergy_hand_limit: 3,
        ..plain_config()
    };
    let mut state = acting(with_pair(IconKind::Pass, config), Side::Home, TurnPhase::TeamAction);
    state.home.synergy_hand = vec![synergy(31, SynergyType::Attack, 1), synergy(32, SynergyType::Attack, 1)];
    let next = apply(&state, pass());
    assert_eq!(next.home.synergy_hand.len(), 3);
    assert_eq!(next.synergy_deck.len(), 9);

    let mut state = acting(with_pair(IconKind::Pass, plain_config()), Side::Home, TurnPhase::TeamAction);
    state.synergy_deck.truncate(1);
    let next = apply(&state, pass());
    assert_eq!(next.home.synergy_hand.len(), 1);
    assert!(next.synergy_deck.is_empty());
}

#[test]
fn test_press_moves_control_toward_actor() {
    let config = plain_config();
    // Only the middle pair counts as press; drop the seam halves
    let press_pair = |left: u32, right: u32| {
        vec![
            defender(left, 3).with_icon(IconPosition::RightMiddle, IconKind::Press),
            defender(right, 3).with_icon(IconPosition::LeftMiddle, IconKind::Press),
        ]
    };
    let mut state = build_match(press_pair(1, 2), vec![], press_pair(21, 22), config);
    put(&mut state, Side::Home, 1, 3, 0);
    put(&mut state, Side::Home, 2, 3, 2);
    put(&mut state, Side::Away, 21, 3, 0);
    put(&mut state, Side::Away, 22, 3, 2);
    assert_eq!(state.icon_report().home.press, 1);
    assert_eq!(state.icon_report().away.press, 1);

    let home = apply(&acting(state.clone(), Side::Home, TurnPhase::TeamAction), press());
    assert_eq!(home.control_position, 80);

    let away = apply(&acting(state.clone(), Side::Away, TurnPhase::TeamAction), press());
    assert_eq!(away.control_position, 20);

    let mut pinned = acting(state, Side::Home, TurnPhase::TeamAction);
    pinned.control_position = 90;
    assert_eq!(apply(&pinned, press()).control_position, 100);
}

#[test]
fn test_press_without_icons_keeps_control() {
    let state = acting(with_pair(IconKind::Pass, plain_config()), Side::Home, TurnPhase::TeamAction);
    let next = apply(&state, press());
    assert_eq!(next.control_position, 50);
    assert_eq!(next.turn_phase, TurnPhase::PlayerAction);
}

#[test]
fn test_place_card_budget_and_hand() {
    let state = build_match(vec![defender(1, 3), defender(2, 3)], vec![], vec![defender(21, 3)], plain_config());
    let state = acting(state, Side::Home, TurnPhase::PlayerAction);

    assert_eq!(
        apply_intent(&state, &Intent::PlaceCard { card: CardId(21), zone: 3, slot: 0 }).map(|_| ()),
        Err(GameError::CardNotInHand { card: CardId(21) })
    );
    assert_eq!(
        apply_intent(&state, &Intent::PlaceCard { card: CardId(99), zone: 3, slot: 0 }).map(|_| ()),
        Err(GameError::UnknownCard { card: CardId(99) })
    );

    let next = apply(&state, Intent::PlaceCard { card: CardId(1), zone: 3, slot: 0 });
    assert_eq!(next.turn_state.placements_made, 1);
    assert_eq!(next.home.hand, vec![CardId(2)]);
    assert_eq!(next.field.home.card_at(3, 1), Some(CardId(1)));
    assert_eq!(
        apply_intent(&next, &Intent::PlaceCard { card: CardId(2), zone: 3, slot: 2 }).map(|_| ()),
        Err(GameError::PlacementLimitReached)
    );
}

#[test]
fn test_away_places_on_its_own_grid() {
    let state = build_match(vec![defender(1, 3)], vec![], vec![defender(21, 3)], plain_config());
    let state = acting(state, Side::Away, TurnPhase::PlayerAction);
    let next = apply(&state, Intent::PlaceCard { card: CardId(21), zone: 3, slot: 1 });
    assert_eq!(next.field.away.card_at(3, 1), Some(CardId(21)));
    assert!(next.field.home.is_empty());
}

fn substitution_match() -> MatchState {
    let mut state = build_match(
        vec![defender(1, 3)],
        vec![defender(2, 4), forward(3, 4)],
        vec![],
        plain_config(),
    );
    put(&mut state, Side::Home, 1, 3, 2);
    acting(state, Side::Home, TurnPhase::PlayerAction)
}

fn sub(incoming: u32, zone: u8, slot: u8) -> Intent {
    Intent::Substitute {
        incoming: CardId(incoming),
        outgoing: CardId(1),
        zone,
        slot,
    }
}

#[test]
fn test_substitution_swaps_card_and_bench() {
    let mut state = substitution_match();
    state.home.used_shot_icons.insert(CardId(1), vec![0]);
    state.turn_state.bonus_shot = Some(CardId(1));
    state.turn_state.ignore_defense = Some(CardId(1));

    let next = apply(&state, sub(2, 3, 2));
    assert_eq!(next.field.home.card_at(3, 2), Some(CardId(2)));
    assert_eq!(next.field.home.card_at(3, 3), Some(CardId(2)));
    assert!(!next.field.home.contains(CardId(1)));
    assert_eq!(next.home.bench, vec![CardId(3), CardId(1)]);
    assert_eq!(next.home.substitutions_left, 2);
    assert!(next.home.used_shot_icons.is_empty());
    assert_eq!(next.turn_state.bonus_shot, None);
    assert_eq!(next.turn_state.ignore_defense, None);
    assert_eq!(next.turn_state.placements_made, 0);
}

#[test]
fn test_substitution_errors() {
    let state = substitution_match();

    let mut exhausted = state.clone();
    exhausted.home.substitutions_left = 0;
    assert_eq!(
        apply_intent(&exhausted, &sub(2, 3, 2)).map(|_| ()),
        Err(GameError::NoSubstitutionsLeft)
    );
    assert_eq!(
        apply_intent(&state, &sub(9, 3, 2)).map(|_| ()),
        Err(GameError::CardNotOnBench { card: CardId(9) })
    );
    assert_eq!(
        apply_intent(&state, &sub(2, 3, 3)).map(|_| ()),
        Err(GameError::CardNotAtPosition {
            card: CardId(1),
            zone: 3,
            slot: 3
        })
    );
    assert_eq!(
        apply_intent(&state, &sub(3, 3, 2)).map(|_| ()),
        Err(GameError::ZoneNotEligible {
            card: CardId(3),
            zone: 3
        })
    );
}

#[test]
fn test_play_synergy_errors() {
    let mut state = build_match(vec![], vec![], vec![], plain_config());
    state = acting(state, Side::Home, TurnPhase::PlayerAction);
    state.home.synergy_hand = vec![
        synergy(31, SynergyType::Attack, 1),
        synergy(32, SynergyType::SetPiece, 2),
        synergy(33, SynergyType::Special, 1),
        synergy(34, SynergyType::Tackle, 2),
    ];
    let play = |id| Intent::PlaySynergy {
        synergy: SynergyId(id),
    };

    assert_eq!(
        apply_intent(&state, &play(40)).map(|_| ()),
        Err(GameError::SynergyNotInHand {
            synergy: SynergyId(40)
        })
    );
    assert_eq!(
        apply_intent(&state, &play(34)).map(|_| ()),
        Err(GameError::SynergyNotAllowed {
            synergy_type: SynergyType::Tackle
        })
    );

    let state = apply(&state, play(31));
    let state = apply(&state, play(32));
    assert_eq!(state.home.active_synergies.len(), 2);
    assert_eq!(
        apply_intent(&state, &play(33)).map(|_| ()),
        Err(GameError::SynergyLimitReached)
    );

    // Unused attacking synergies go back to the hand at the end of the turn
    let state = apply(&state, Intent::EndTurn);
    assert!(state.home.active_synergies.is_empty());
    assert_eq!(state.home.synergy_hand.len(), 4);
    assert_eq!(state.current_side, Side::Away);
}
