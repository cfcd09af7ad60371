//! Turn actions
//!
//! Handlers for everything the side on the ball does outside a duel:
//! kick-off, the team action, placements, synergy plays, substitutions and
//! handing the turn over. Each handler mutates the working copy the engine
//! gives it and reports rejections through `GameError`.

use alloc::format;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::config::{CONTROL_CENTER, CONTROL_MAX};
use crate::duel::DuelPhase;
use crate::effects;
use crate::error::{GameError, GameResult};
use crate::match_log::LogKind;
use crate::penalties;
use crate::phase::{IntentKind, MatchPhase, TurnPhase};
use crate::placement::validate_placement;
use crate::state::MatchState;
use crate::types::{CardId, IconKind, Side, SynergyId, SynergyType};

/// The two team actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TeamAction {
    /// Draw synergies for every complete pass icon
    Pass,
    /// Push the control position for every complete press icon
    Press,
}

/// Start a half.
pub fn kick_off(state: &mut MatchState) -> GameResult<()> {
    match state.phase {
        MatchPhase::Draft => {
            let initial = state.config.initial_synergy_hand as usize;
            for side in Side::ALL {
                state.draw_synergies(side, initial);
            }
            state.phase = MatchPhase::FirstHalf;
            state.current_side = Side::Home;
        }
        MatchPhase::HalfTime => {
            state.phase = MatchPhase::SecondHalf;
            state.current_side = Side::Away;
            state.control_position = CONTROL_CENTER;
        }
        _ => {
            return Err(GameError::WrongPhase {
                intent: IntentKind::KickOff,
            })
        }
    }
    state.turn = 1;
    let message = format!("kick-off, {} half, {} to play", state.phase, state.current_side);
    state.push_log(Some(state.current_side), LogKind::KickOff, message);
    state.begin_turn();
    Ok(())
}

/// Snap `position` to the nearest multiple of `step`, ties toward `side`.
pub fn snap_control(position: i32, step: i32, side: Side) -> i32 {
    if step <= 0 {
        return position.clamp(0, CONTROL_MAX);
    }
    let below = position.div_euclid(step) * step;
    let above = below + step;
    let snapped = match (position - below) * 2 {
        d if d < step => below,
        d if d > step => above,
        _ if side == Side::Home => above,
        _ => below,
    };
    snapped.clamp(0, CONTROL_MAX)
}

/// Resolve the team action and move on to the player actions.
pub fn team_action(state: &mut MatchState, action: TeamAction) -> GameResult<()> {
    let side = state.current_side;
    let counts = *state.icon_report().for_side(side);

    let message = match action {
        TeamAction::Pass => {
            let wanted = counts.get(IconKind::Pass) as usize * state.config.pass_draw_per_icon as usize;
            let drawn = state.draw_synergies(side, wanted);
            format!("pass: {} icons, drew {} synergies", counts.pass, drawn)
        }
        TeamAction::Press => {
            let icons = counts.get(IconKind::Press) as i32;
            let before = state.control_position;
            if icons > 0 {
                let step = state.config.press_step;
                state.shift_control(side, icons * step);
                state.control_position = snap_control(state.control_position, step, side);
            }
            format!(
                "press: {} icons, control {} -> {}",
                icons, before, state.control_position
            )
        }
    };

    state.push_log(Some(side), LogKind::TeamAction, message);
    state.turn_phase = TurnPhase::PlayerAction;
    Ok(())
}

/// Place an athlete from the hand and fire its effect.
pub fn place_card(state: &mut MatchState, card: CardId, zone: u8, slot: u8) -> GameResult<()> {
    let side = state.current_side;
    let athlete = state.athlete(card)?.clone();
    if !state.side(side).hand.contains(&card) {
        return Err(GameError::CardNotInHand { card });
    }
    if state.turn_state.placements_made >= state.config.placements_per_turn {
        return Err(GameError::PlacementLimitReached);
    }

    let grid = state.field.grid(side);
    validate_placement(&athlete, grid, zone, slot, grid.is_empty())?;

    state.field.grid_mut(side).place(card, zone, slot);
    state.side_mut(side).hand.retain(|c| *c != card);
    state.turn_state.placements_made += 1;
    state.push_log(
        Some(side),
        LogKind::Placement,
        format!("{} placed in zone {} slot {}", athlete.short_name, zone, slot),
    );

    effects::fire(state, side, card, athlete.effect);
    Ok(())
}

/// Activate a synergy card.
///
/// Outside a duel the side on the ball plays attacking types ahead of a
/// shot; during defender selection the defending side plays defensive ones.
pub fn play_synergy(state: &mut MatchState, synergy: SynergyId) -> GameResult<()> {
    let (side, allowed): (Side, fn(SynergyType) -> bool) = match &state.duel {
        None => (
            state.current_side,
            SynergyType::usable_by_attacker,
        ),
        Some(duel) if duel.phase == DuelPhase::DefenderSynergySelection => (
            duel.defending_side(),
            SynergyType::usable_by_defender,
        ),
        Some(_) => return Err(GameError::DuelInProgress),
    };

    let hand = &state.side(side).synergy_hand;
    let index = hand
        .iter()
        .position(|s| s.id == synergy)
        .ok_or(GameError::SynergyNotInHand { synergy })?;
    let synergy_type = hand[index].synergy_type;
    if !allowed(synergy_type) {
        return Err(GameError::SynergyNotAllowed { synergy_type });
    }
    if state.side(side).active_synergies.len() >= state.config.max_duel_synergies as usize {
        return Err(GameError::SynergyLimitReached);
    }

    let card = state.side_mut(side).synergy_hand.remove(index);
    let message = format!("{} plays {} ({}, {} stars)", side, card.name, card.synergy_type, card.stars);
    state.side_mut(side).active_synergies.push(card);
    state.push_log(Some(side), LogKind::Synergy, message);
    Ok(())
}

/// Swap a fielded athlete for one from the bench.
pub fn substitute(
    state: &mut MatchState,
    incoming: CardId,
    outgoing: CardId,
    zone: u8,
    slot: u8,
) -> GameResult<()> {
    let side = state.current_side;
    if state.side(side).substitutions_left == 0 {
        return Err(GameError::NoSubstitutionsLeft);
    }
    if !state.side(side).bench.contains(&incoming) {
        return Err(GameError::CardNotOnBench { card: incoming });
    }
    let at_position = state
        .field
        .grid(side)
        .find(outgoing)
        .map_or(false, |p| p.zone == zone && p.start == slot);
    if !at_position {
        return Err(GameError::CardNotAtPosition {
            card: outgoing,
            zone,
            slot,
        });
    }
    let athlete = state.athlete(incoming)?;
    if !athlete.zones.contains(zone) {
        return Err(GameError::ZoneNotEligible {
            card: incoming,
            zone,
        });
    }

    state.field.grid_mut(side).replace(outgoing, incoming);
    let team = state.side_mut(side);
    team.bench.retain(|c| *c != incoming);
    team.bench.push(outgoing);
    team.used_shot_icons.remove(&incoming);
    team.used_shot_icons.remove(&outgoing);
    team.substitutions_left -= 1;

    let grants = &mut state.turn_state;
    if grants.bonus_shot == Some(outgoing) {
        grants.bonus_shot = None;
    }
    if grants.ignore_defense == Some(outgoing) {
        grants.ignore_defense = None;
    }

    state.push_log(
        Some(side),
        LogKind::Substitution,
        format!("{} replaces {} in zone {} slot {}", incoming, outgoing, zone, slot),
    );
    Ok(())
}

/// Hand the turn over, closing the half when its turns are used up.
pub fn end_turn(state: &mut MatchState) -> GameResult<()> {
    if state.duel.is_some() {
        return Err(GameError::DuelInProgress);
    }
    if state.pending_choice.is_some() {
        return Err(GameError::ChoicePending);
    }

    let side = state.current_side;
    state.turn_phase = TurnPhase::End;
    let unused: Vec<_> = state.side_mut(side).active_synergies.drain(..).collect();
    state.side_mut(side).synergy_hand.extend(unused);
    state.push_log(Some(side), LogKind::TurnEnd, format!("{} ends turn {}", side, state.turn));

    if state.turn < state.config.turns_per_half {
        state.turn += 1;
        state.current_side = side.opponent();
        state.begin_turn();
        return Ok(());
    }

    match state.phase {
        MatchPhase::FirstHalf => {
            state.phase = MatchPhase::HalfTime;
            state.turn_phase = TurnPhase::Start;
            state.reset_shot_icons();
            let (home, away) = state.score();
            state.push_log(None, LogKind::HalfTime, format!("half time, {}-{}", home, away));
        }
        _ => {
            let (home, away) = state.score();
            if home == away && state.config.penalties_on_draw {
                penalties::start(state);
            } else {
                state.phase = MatchPhase::FullTime;
                state.push_log(None, LogKind::FullTime, format!("full time, {}-{}", home, away));
            }
            state.turn_phase = TurnPhase::End;
        }
    }
    state.log_summary();
    Ok(())
}
