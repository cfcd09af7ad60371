//! Shot and duel resolution
//!
//! A shot opens a duel between the shooter and the best defender in its
//! lane. The duel is revealed step by step through `AdvanceDuel` so a
//! presentation layer can animate each stage; the outcome is decided when the
//! duel reaches `Result`.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Reverse;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::config::{CONTROL_CENTER, CONTROL_MAX};
use crate::error::{GameError, GameResult};
use crate::field::{field_start, Placement};
use crate::icons::IconReport;
use crate::match_log::LogKind;
use crate::phase::TurnPhase;
use crate::state::MatchState;
use crate::types::{CardId, IconKind, Side, SynergyType};

/// Presentation steps of a duel, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuelPhase {
    Init,
    SelectShotIcon,
    RevealAttacker,
    RevealDefender,
    /// The defending side may play synergies
    DefenderSynergySelection,
    RevealSynergy,
    RevealSkills,
    /// Powers are frozen
    Summary,
    /// Outcome decided; the next step clears the duel
    Result,
}

impl DuelPhase {
    /// Following step, or `None` once the result has been shown.
    pub fn next(self, has_defender: bool) -> Option<DuelPhase> {
        match self {
            DuelPhase::Init => Some(DuelPhase::SelectShotIcon),
            DuelPhase::SelectShotIcon => Some(DuelPhase::RevealAttacker),
            DuelPhase::RevealAttacker => Some(DuelPhase::RevealDefender),
            DuelPhase::RevealDefender if has_defender => Some(DuelPhase::DefenderSynergySelection),
            DuelPhase::RevealDefender => Some(DuelPhase::RevealSynergy),
            DuelPhase::DefenderSynergySelection => Some(DuelPhase::RevealSynergy),
            DuelPhase::RevealSynergy => Some(DuelPhase::RevealSkills),
            DuelPhase::RevealSkills => Some(DuelPhase::Summary),
            DuelPhase::Summary => Some(DuelPhase::Result),
            DuelPhase::Result => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DuelOutcome {
    Goal,
    Saved,
    Missed,
}

/// A shot being resolved
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Duel {
    pub attacker_side: Side,
    pub shooter: CardId,
    /// Attack-icon index spent on this shot
    pub shot_icon: u8,
    /// Unused attack icons of the shooter when the shot was taken
    pub unused_icons: u8,
    pub defender: Option<CardId>,
    pub phase: DuelPhase,
    /// Frozen at `Summary`
    pub attack_power: Option<i32>,
    /// Frozen at `Summary`
    pub defense_power: Option<i32>,
    pub outcome: Option<DuelOutcome>,
}

impl Duel {
    pub fn defending_side(&self) -> Side {
        self.attacker_side.opponent()
    }
}

fn active_stars(state: &MatchState, side: Side, accept: impl Fn(SynergyType) -> bool) -> i32 {
    state
        .side(side)
        .active_synergies
        .iter()
        .filter(|synergy| accept(synergy.synergy_type))
        .map(|synergy| synergy.stars)
        .sum()
}

/// Control position sits in `side`'s attacking bonus band.
fn has_control_bonus(state: &MatchState, side: Side) -> bool {
    let threshold = state.config.control_attack_threshold;
    match side {
        Side::Home => state.control_position >= threshold,
        Side::Away => state.control_position <= CONTROL_MAX - threshold,
    }
}

/// Unused attack icons counted for `card`; frozen while it is shooting.
fn unused_for_power(state: &MatchState, side: Side, card: CardId) -> i32 {
    match &state.duel {
        Some(duel) if duel.attacker_side == side && duel.shooter == card => duel.unused_icons as i32,
        _ => state.unused_attack_icons(side, card) as i32,
    }
}

/// Attack power of `card` shooting for `side`, never below zero.
pub fn attack_power(state: &MatchState, side: Side, card: CardId) -> i32 {
    attack_power_with(state, &state.icon_report(), side, card)
}

/// `attack_power` against an already computed icon report.
pub fn attack_power_with(state: &MatchState, report: &IconReport, side: Side, card: CardId) -> i32 {
    let Some(athlete) = state.catalog.athlete(card) else {
        return 0;
    };
    let config = &state.config;

    let mut power = athlete.base_power;
    power += unused_for_power(state, side, card);
    power += active_stars(state, side, SynergyType::usable_by_attacker);
    power += config.attack_icon_bonus * report.count_for(side, card, IconKind::Attack) as i32;
    if has_control_bonus(state, side) {
        power += config.control_attack_bonus;
    }
    power -= active_stars(state, side.opponent(), |t| t == SynergyType::Tackle);

    power.max(0)
}

/// Defense power of `card` defending for `side`.
pub fn defense_power(state: &MatchState, side: Side, card: CardId) -> i32 {
    defense_power_with(state, &state.icon_report(), side, card)
}

pub fn defense_power_with(state: &MatchState, report: &IconReport, side: Side, card: CardId) -> i32 {
    let Some(athlete) = state.catalog.athlete(card) else {
        return 0;
    };

    let mut power = athlete.base_power + athlete.defense_icon_count() as i32;
    power += active_stars(state, side, |t| {
        matches!(t, SynergyType::Defense | SynergyType::Special)
    });
    power += state.config.defense_icon_bonus * report.count_for(side, card, IconKind::Defense) as i32;

    power.max(0)
}

/// Best opposing card in the shooter's lane.
///
/// The lane is the shooter's two columns widened by one on each side, in
/// canonical coordinates. Ties go to the deeper card, then the lower id.
pub fn choose_defender(state: &MatchState, attacker: Side, shooter: &Placement) -> Option<CardId> {
    let defender_side = attacker.opponent();
    let lane_left = field_start(attacker, shooter.start) as i32 - 1;
    let lane_right = field_start(attacker, shooter.start) as i32 + 2;
    let report = state.icon_report();

    state
        .field
        .grid(defender_side)
        .placements()
        .into_iter()
        .filter(|p| {
            let left = field_start(defender_side, p.start) as i32;
            left <= lane_right && left + 1 >= lane_left
        })
        .max_by_key(|p| {
            (
                defense_power_with(state, &report, defender_side, p.card),
                p.zone,
                Reverse(p.card),
            )
        })
        .map(|p| p.card)
}

/// Decide a frozen duel.
pub fn decide(attack: i32, defense: Option<i32>, miss_margin: i32) -> DuelOutcome {
    match defense {
        None => DuelOutcome::Goal,
        Some(defense) if attack > defense => DuelOutcome::Goal,
        Some(defense) if attack <= defense - miss_margin => DuelOutcome::Missed,
        Some(_) => DuelOutcome::Saved,
    }
}

/// Take a shot with the card at (`zone`, `slot`) of the acting side.
pub fn shoot(state: &mut MatchState, card: CardId, zone: u8, slot: u8) -> GameResult<()> {
    if state.duel.is_some() {
        return Err(GameError::DuelInProgress);
    }
    let side = state.current_side;
    let placement = state
        .field
        .grid(side)
        .find(card)
        .filter(|p| p.zone == zone && p.start == slot)
        .ok_or(GameError::CardNotAtPosition { card, zone, slot })?;

    let has_grant = state.turn_state.bonus_shot == Some(card);
    if !has_grant && state.turn_state.shots_taken >= state.config.shots_per_turn {
        return Err(GameError::ShotLimitReached);
    }
    let shot_icon = state
        .next_unused_attack_index(side, card)
        .ok_or(GameError::NoUnusedShotIcon { card })?;

    let unused_icons = state.unused_attack_icons(side, card);
    state
        .side_mut(side)
        .used_shot_icons
        .entry(card)
        .or_default()
        .push(shot_icon);
    state.field.grid_mut(side).add_shot_marker(card);

    if has_grant {
        state.turn_state.bonus_shot = None;
    } else {
        state.turn_state.shots_taken += 1;
    }

    let defender = if state.turn_state.ignore_defense == Some(card) {
        state.turn_state.ignore_defense = None;
        None
    } else {
        choose_defender(state, side, &placement)
    };

    state.duel = Some(Duel {
        attacker_side: side,
        shooter: card,
        shot_icon,
        unused_icons,
        defender,
        phase: DuelPhase::Init,
        attack_power: None,
        defense_power: None,
        outcome: None,
    });
    state.turn_phase = TurnPhase::Shooting;

    let message = match defender {
        Some(defender) => format!("{} shoots ({}), {} defends", card, shot_icon, defender),
        None => format!("{} shoots ({}) with no defender", card, shot_icon),
    };
    state.push_log(Some(side), LogKind::Shot, message);
    Ok(())
}

/// Move the pending duel one step forward.
pub fn advance(state: &mut MatchState) -> GameResult<()> {
    let duel = state.duel.clone().ok_or(GameError::NoDuelPending)?;
    let side = duel.attacker_side;

    let Some(next) = duel.phase.next(duel.defender.is_some()) else {
        clear(state);
        return Ok(());
    };

    let mut updated = Duel {
        phase: next,
        ..duel
    };
    let message = match next {
        DuelPhase::Init => None,
        DuelPhase::SelectShotIcon => Some(format!(
            "{} uses attack icon {}",
            updated.shooter, updated.shot_icon
        )),
        DuelPhase::RevealAttacker => Some(format!("attacker {}", updated.shooter)),
        DuelPhase::RevealDefender => Some(match updated.defender {
            Some(defender) => format!("defender {}", defender),
            None => String::from("no defender in the lane"),
        }),
        DuelPhase::DefenderSynergySelection => None,
        DuelPhase::RevealSynergy => {
            let attack = state.side(side).active_synergies.len();
            let defense = state.side(side.opponent()).active_synergies.len();
            Some(format!("synergies: {} attacking, {} defending", attack, defense))
        }
        DuelPhase::RevealSkills => None,
        DuelPhase::Summary => {
            let report = state.icon_report();
            let attack = attack_power_with(state, &report, side, updated.shooter);
            let defense = updated
                .defender
                .map(|defender| defense_power_with(state, &report, side.opponent(), defender));
            updated.attack_power = Some(attack);
            updated.defense_power = defense;
            Some(format!("attack {} vs defense {}", attack, defense.unwrap_or(0)))
        }
        DuelPhase::Result => {
            let attack = updated.attack_power.unwrap_or(0);
            let outcome = decide(attack, updated.defense_power, state.config.miss_margin);
            updated.outcome = Some(outcome);
            Some(format!("{:?}", outcome))
        }
    };

    let outcome = if next == DuelPhase::Result {
        updated.outcome
    } else {
        None
    };
    state.duel = Some(updated);
    if let Some(message) = message {
        state.push_log(Some(side), LogKind::Duel, message);
    }

    if outcome == Some(DuelOutcome::Goal) {
        state.side_mut(side).score += 1;
        state.control_position = CONTROL_CENTER;
        let (home, away) = state.score();
        state.push_log(Some(side), LogKind::Goal, format!("goal for {}, {}-{}", side, home, away));
        crate::log::info(&format!("goal for {} ({}-{})", side, home, away));
    }
    Ok(())
}

/// Close the duel and discard every active synergy.
fn clear(state: &mut MatchState) {
    for side in Side::ALL {
        let spent: Vec<_> = state.side_mut(side).active_synergies.drain(..).collect();
        state.discard.extend(spent);
    }
    state.duel = None;
    state.turn_phase = TurnPhase::PlayerAction;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decide_outcomes() {
        assert_eq!(decide(3, None, 3), DuelOutcome::Goal);
        assert_eq!(decide(6, Some(5), 3), DuelOutcome::Goal);
        assert_eq!(decide(5, Some(5), 3), DuelOutcome::Saved);
        assert_eq!(decide(3, Some(5), 3), DuelOutcome::Saved);
        assert_eq!(decide(2, Some(5), 3), DuelOutcome::Missed);
    }

    #[test]
    fn test_duel_steps_skip_defender_selection_without_defender() {
        assert_eq!(
            DuelPhase::RevealDefender.next(false),
            Some(DuelPhase::RevealSynergy)
        );
        assert_eq!(
            DuelPhase::RevealDefender.next(true),
            Some(DuelPhase::DefenderSynergySelection)
        );
        assert_eq!(DuelPhase::Result.next(true), None);
    }
}
