//! Immediate effects
//!
//! One-shot effects printed on athlete cards. They fire once, right after the
//! card is placed from the hand; substitutes never trigger them.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Reverse;

use crate::actions::snap_control;
use crate::error::{GameError, GameResult};
use crate::match_log::LogKind;
use crate::state::{MatchState, SynergyChoice};
use crate::types::{CardId, ImmediateEffect, Side, SynergyId};

/// Apply `effect` of `card`, just placed by `side`.
pub fn fire(state: &mut MatchState, side: Side, card: CardId, effect: ImmediateEffect) {
    let message = match effect {
        ImmediateEffect::None => return,
        ImmediateEffect::DrawSynergy { count } => {
            let drawn = state.draw_synergies(side, count as usize);
            format!("{} draws {} synergies", card, drawn)
        }
        ImmediateEffect::DrawSynergyChoose { count } => reveal_choice(state, side, card, count),
        ImmediateEffect::StealSynergy => steal_best(state, side, card),
        ImmediateEffect::InstantShot => {
            state.turn_state.bonus_shot = Some(card);
            format!("{} may shoot at once", card)
        }
        ImmediateEffect::IgnoreDefense => {
            state.turn_state.ignore_defense = Some(card);
            format!("{} will shoot past the defense", card)
        }
        ImmediateEffect::MoveControl { steps } => {
            let before = state.control_position;
            let step = state.config.press_step;
            state.shift_control(side, steps as i32 * step);
            state.control_position = snap_control(state.control_position, step, side);
            format!("{} moves control {} -> {}", card, before, state.control_position)
        }
    };
    state.push_log(Some(side), LogKind::Effect, message);
}

fn hand_room(state: &MatchState, side: Side) -> usize {
    (state.config.synergy_hand_limit as usize).saturating_sub(state.side(side).synergy_hand.len())
}

fn reveal_choice(state: &mut MatchState, side: Side, card: CardId, count: u8) -> String {
    let n = if hand_room(state, side) == 0 {
        0
    } else {
        (count as usize).min(state.synergy_deck.len())
    };
    let revealed: Vec<_> = state.synergy_deck.drain(..n).collect();

    match revealed.len() {
        0 => format!("{} reveals nothing", card),
        1 => {
            state.side_mut(side).synergy_hand.extend(revealed);
            format!("{} reveals a single synergy and keeps it", card)
        }
        n => {
            state.pending_choice = Some(SynergyChoice {
                side,
                options: revealed,
            });
            format!("{} reveals {} synergies to choose from", card, n)
        }
    }
}

fn steal_best(state: &mut MatchState, side: Side, card: CardId) -> String {
    if hand_room(state, side) == 0 {
        return format!("{} has no room to steal", card);
    }
    let victim = &state.side(side.opponent()).synergy_hand;
    let best = victim
        .iter()
        .enumerate()
        .max_by_key(|(_, s)| (s.stars, Reverse(s.id)))
        .map(|(index, _)| index);

    match best {
        Some(index) => {
            let stolen = state.side_mut(side.opponent()).synergy_hand.remove(index);
            let message = format!("{} steals {}", card, stolen.name);
            state.side_mut(side).synergy_hand.push(stolen);
            message
        }
        None => format!("{} finds nothing to steal", card),
    }
}

/// Keep one revealed synergy; the others go to the bottom of the deck.
pub fn choose_synergy(state: &mut MatchState, synergy: SynergyId) -> GameResult<()> {
    let choice = state.pending_choice.take().ok_or(GameError::NoChoicePending)?;
    let SynergyChoice { side, mut options } = choice;
    let index = options
        .iter()
        .position(|s| s.id == synergy)
        .ok_or(GameError::SynergyNotInHand { synergy })?;

    let chosen = options.remove(index);
    let message = format!("{} keeps {}", side, chosen.name);
    state.side_mut(side).synergy_hand.push(chosen);
    state.synergy_deck.extend(options);
    state.push_log(Some(side), LogKind::Synergy, message);
    Ok(())
}
