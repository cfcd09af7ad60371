use super::*;
use crate::error::GameError;
use crate::match_log::LogKind;

fn with_effect(effect: ImmediateEffect) -> MatchState {
    let card = defender(1, 3).with_effect(effect);
    let state = build_match(vec![card], vec![], vec![defender(21, 3)], plain_config());
    acting(state, Side::Home, TurnPhase::PlayerAction)
}

fn place() -> Intent {
    Intent::PlaceCard {
        card: CardId(1),
        zone: 3,
        slot: 3,
    }
}

#[test]
fn test_draw_synergy() {
    let state = with_effect(ImmediateEffect::DrawSynergy { count: 2 });
    let next = apply(&state, place());
    assert_eq!(next.home.synergy_hand[..], state.synergy_deck[..2]);
    assert_eq!(next.synergy_deck.len(), 8);
    assert_eq!(next.log.last().map(|e| e.kind), Some(LogKind::Effect));
}

#[test]
fn test_draw_and_choose() {
    let state = with_effect(ImmediateEffect::DrawSynergyChoose { count: 3 });
    let revealed = state.synergy_deck[..3].to_vec();

    let next = apply(&state, place());
    let choice = next.pending_choice.clone().expect("choice is pending");
    assert_eq!(choice.side, Side::Home);
    assert_eq!(choice.options, revealed);
    assert_eq!(next.acting_side(), Some(Side::Home));

    assert_eq!(
        apply_intent(&next, &Intent::EndTurn).map(|_| ()),
        Err(GameError::ChoicePending)
    );
    assert_eq!(
        apply_intent(&next, &Intent::ChooseSynergy { synergy: SynergyId(99) }).map(|_| ()),
        Err(GameError::SynergyNotInHand {
            synergy: SynergyId(99)
        })
    );

    let chosen = apply(&next, Intent::ChooseSynergy { synergy: revealed[1].id });
    assert!(chosen.pending_choice.is_none());
    assert_eq!(chosen.home.synergy_hand, vec![revealed[1].clone()]);
    assert_eq!(chosen.synergy_deck.len(), 9);
    assert_eq!(chosen.synergy_deck[7..], [revealed[0].clone(), revealed[2].clone()]);
}

#[test]
fn test_choose_without_pending_choice() {
    let state = with_effect(ImmediateEffect::None);
    assert_eq!(
        apply_intent(&state, &Intent::ChooseSynergy { synergy: SynergyId(1) }).map(|_| ()),
        Err(GameError::NoChoicePending)
    );
}

#[test]
fn test_single_reveal_goes_straight_to_hand() {
    let mut state = with_effect(ImmediateEffect::DrawSynergyChoose { count: 3 });
    state.synergy_deck.truncate(1);
    let only = state.synergy_deck[0].clone();

    let next = apply(&state, place());
    assert!(next.pending_choice.is_none());
    assert_eq!(next.home.synergy_hand, vec![only]);
}

#[test]
fn test_full_hand_reveals_nothing() {
    let mut state = with_effect(ImmediateEffect::DrawSynergyChoose { count: 3 });
    state.home.synergy_hand = (31..37).map(|id| synergy(id, SynergyType::Attack, 1)).collect();

    let next = apply(&state, place());
    assert!(next.pending_choice.is_none());
    assert_eq!(next.synergy_deck, state.synergy_deck);
}

#[test]
fn test_steal_takes_best_card() {
    let mut state = with_effect(ImmediateEffect::StealSynergy);
    state.away.synergy_hand = vec![
        synergy(41, SynergyType::Defense, 2),
        synergy(42, SynergyType::Tackle, 3),
        synergy(40, SynergyType::Attack, 3),
    ];

    let next = apply(&state, place());
    assert_eq!(next.home.synergy_hand.iter().map(|s| s.id).collect::<Vec<_>>(), vec![SynergyId(40)]);
    assert_eq!(next.away.synergy_hand.len(), 2);

    let mut empty = with_effect(ImmediateEffect::StealSynergy);
    empty.away.synergy_hand.clear();
    let next = apply(&empty, place());
    assert!(next.home.synergy_hand.is_empty());
}

#[test]
fn test_shot_grants() {
    let next = apply(&with_effect(ImmediateEffect::InstantShot), place());
    assert_eq!(next.turn_state.bonus_shot, Some(CardId(1)));

    let next = apply(&with_effect(ImmediateEffect::IgnoreDefense), place());
    assert_eq!(next.turn_state.ignore_defense, Some(CardId(1)));

    // Grants last for the current turn only
    let next = apply(&next, Intent::EndTurn);
    assert_eq!(next.turn_state.ignore_defense, None);
}

#[test]
fn test_move_control_for_away() {
    let card = defender(21, 3).with_effect(ImmediateEffect::MoveControl { steps: 1 });
    let state = build_match(vec![], vec![], vec![card], plain_config());
    let state = acting(state, Side::Away, TurnPhase::PlayerAction);

    let next = apply(
        &state,
        Intent::PlaceCard {
            card: CardId(21),
            zone: 3,
            slot: 0,
        },
    );
    // 50 - 20 lands between grid points and snaps toward the away goal
    assert_eq!(next.control_position, 20);
}

#[test]
fn test_move_control_stays_on_press_grid() {
    let mut state = with_effect(ImmediateEffect::MoveControl { steps: 1 });
    // 50 + 20 sits halfway between 60 and 80; home snaps upfield
    let next = apply(&state, place());
    assert_eq!(next.control_position, 80);

    state.control_position = 40;
    let next = apply(&state, place());
    assert_eq!(next.control_position, 60);
}

#[test]
fn test_substitute_does_not_fire_effect() {
    let mut state = build_match(
        vec![defender(1, 3)],
        vec![defender(2, 3).with_effect(ImmediateEffect::DrawSynergy { count: 2 })],
        vec![],
        plain_config(),
    );
    put(&mut state, Side::Home, 1, 3, 3);
    let state = acting(state, Side::Home, TurnPhase::PlayerAction);

    let next = apply(
        &state,
        Intent::Substitute {
            incoming: CardId(2),
            outgoing: CardId(1),
            zone: 3,
            slot: 3,
        },
    );
    assert!(next.home.synergy_hand.is_empty());
    assert_eq!(next.synergy_deck, state.synergy_deck);
}
