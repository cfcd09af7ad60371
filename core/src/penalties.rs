//! Penalty shootout
//!
//! Decides a level match. Sides alternate kicks, home first. A kick beats the
//! keeper when the taker's kick power exceeds the best defense power on the
//! opposing field. Every fielded card kicks once before any card of the same
//! side kicks again.

use alloc::format;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::duel::defense_power_with;
use crate::error::{GameError, GameResult};
use crate::match_log::LogKind;
use crate::phase::{MatchPhase, TurnPhase};
use crate::state::MatchState;
use crate::types::{CardId, Side};

/// A single penalty kick
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyKick {
    pub side: Side,
    pub taker: CardId,
    pub kick: i32,
    pub keeper: i32,
    pub scored: bool,
}

/// Running shootout
#[derive(Debug, Clone, PartialEq, Eq, Default, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shootout {
    pub kicks: Vec<PenaltyKick>,
    /// Cards of each side that kicked in the current cycle
    pub home_takers: Vec<CardId>,
    pub away_takers: Vec<CardId>,
    pub winner: Option<Side>,
    pub finished: bool,
}

impl Shootout {
    /// Side due to kick next; home kicks first in every round.
    pub fn next_side(&self) -> Side {
        if self.taken(Side::Home) > self.taken(Side::Away) {
            Side::Away
        } else {
            Side::Home
        }
    }

    pub fn taken(&self, side: Side) -> u32 {
        self.kicks.iter().filter(|k| k.side == side).count() as u32
    }

    pub fn goals(&self, side: Side) -> u32 {
        self.kicks.iter().filter(|k| k.side == side && k.scored).count() as u32
    }

    pub fn takers(&self, side: Side) -> &[CardId] {
        match side {
            Side::Home => &self.home_takers,
            Side::Away => &self.away_takers,
        }
    }

    fn takers_mut(&mut self, side: Side) -> &mut Vec<CardId> {
        match side {
            Side::Home => &mut self.home_takers,
            Side::Away => &mut self.away_takers,
        }
    }

    /// Settle the shootout after a kick.
    ///
    /// Within the regulation rounds it ends as soon as one side cannot be
    /// caught. Afterwards every completed round is sudden death, until
    /// `max_rounds` rounds have been played level.
    fn settle(&mut self, rounds: u32, max_rounds: u32) {
        let (home_taken, away_taken) = (self.taken(Side::Home), self.taken(Side::Away));
        let (home, away) = (self.goals(Side::Home), self.goals(Side::Away));

        if home_taken <= rounds && away_taken <= rounds {
            let home_left = rounds - home_taken;
            let away_left = rounds - away_taken;
            if home > away + away_left {
                self.winner = Some(Side::Home);
            } else if away > home + home_left {
                self.winner = Some(Side::Away);
            }
        } else if home_taken == away_taken && home != away {
            self.winner = Some(if home > away { Side::Home } else { Side::Away });
        }

        self.finished = self.winner.is_some()
            || (home_taken == away_taken && home_taken >= max_rounds.max(rounds));
    }
}

/// Kick power of a penalty taker.
pub fn kick_power(state: &MatchState, card: CardId) -> i32 {
    state
        .catalog
        .athlete(card)
        .map(|a| a.base_power + a.attack_icon_count() as i32)
        .unwrap_or(0)
}

/// Best defense power fielded by `side`.
pub fn keeper_power(state: &MatchState, side: Side) -> i32 {
    let report = state.icon_report();
    state
        .field
        .grid(side)
        .placements()
        .iter()
        .map(|p| defense_power_with(state, &report, side, p.card))
        .max()
        .unwrap_or(0)
}

/// Cards of `side` allowed to take its next kick.
pub fn available_takers(state: &MatchState, side: Side) -> Vec<CardId> {
    let used = state.shootout.as_ref().map(|s| s.takers(side)).unwrap_or(&[]);
    state
        .field
        .grid(side)
        .placements()
        .into_iter()
        .map(|p| p.card)
        .filter(|card| !used.contains(card))
        .collect()
}

/// Open the shootout, or end the match level when a side has nobody to kick.
pub fn start(state: &mut MatchState) {
    let (home, away) = state.score();
    if Side::ALL.iter().any(|side| state.field.grid(*side).is_empty()) {
        state.phase = MatchPhase::FullTime;
        state.push_log(None, LogKind::FullTime, format!("full time, {}-{}", home, away));
        return;
    }
    state.phase = MatchPhase::Penalty;
    state.turn_phase = TurnPhase::End;
    state.shootout = Some(Shootout::default());
    state.push_log(None, LogKind::Penalty, format!("{}-{}, penalties", home, away));
    crate::log::info("match level, penalty shootout");
}

/// Take the next kick with `card`.
pub fn take_penalty(state: &mut MatchState, card: CardId) -> GameResult<()> {
    let mut shootout = state.shootout.clone().ok_or(GameError::WrongPhase {
        intent: crate::phase::IntentKind::TakePenalty,
    })?;
    let side = shootout.next_side();
    if !available_takers(state, side).contains(&card) {
        return Err(GameError::PenaltyTakerUnavailable { card });
    }

    let kick = kick_power(state, card);
    let keeper = keeper_power(state, side.opponent());
    let scored = kick > keeper;
    shootout.kicks.push(PenaltyKick {
        side,
        taker: card,
        kick,
        keeper,
        scored,
    });

    let fielded = state.field.grid(side).card_count();
    let takers = shootout.takers_mut(side);
    takers.push(card);
    if takers.len() >= fielded {
        takers.clear();
    }

    shootout.settle(
        state.config.penalty_rounds as u32,
        state.config.max_penalty_rounds as u32,
    );

    let verdict = if scored { "scores" } else { "is saved" };
    state.push_log(
        Some(side),
        LogKind::Penalty,
        format!("{} {} ({} vs {})", card, verdict, kick, keeper),
    );

    if shootout.finished {
        let message = match shootout.winner {
            Some(winner) => format!(
                "{} win the shootout {}-{}",
                winner,
                shootout.goals(winner),
                shootout.goals(winner.opponent())
            ),
            None => format!("shootout level after {} rounds", shootout.taken(Side::Home)),
        };
        state.phase = MatchPhase::FullTime;
        state.push_log(shootout.winner, LogKind::FullTime, message);
    }
    state.shootout = Some(shootout);
    Ok(())
}
