//! Match engine
//!
//! `apply_intent` is the single entry point of the rules: it checks the
//! intent against both phase layers, applies it to a copy of the snapshot and
//! returns the copy. `MatchEngine` wraps it for hosts that want to keep the
//! current snapshot and the intent history together.

use alloc::format;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::actions::{self, TeamAction};
use crate::duel;
use crate::effects;
use crate::error::{GameError, GameResult};
use crate::log;
use crate::penalties;
use crate::phase::{self, IntentKind};
use crate::state::MatchState;
use crate::types::{CardId, SynergyId};
use crate::view::MatchView;

/// Everything a side can ask the rules to do
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Intent {
    KickOff,
    PlaceCard { card: CardId, zone: u8, slot: u8 },
    TeamAction { action: TeamAction },
    PlaySynergy { synergy: SynergyId },
    ChooseSynergy { synergy: SynergyId },
    Shoot { card: CardId, zone: u8, slot: u8 },
    AdvanceDuel,
    Substitute {
        incoming: CardId,
        outgoing: CardId,
        zone: u8,
        slot: u8,
    },
    EndTurn,
    TakePenalty { card: CardId },
}

impl Intent {
    pub fn kind(&self) -> IntentKind {
        match self {
            Intent::KickOff => IntentKind::KickOff,
            Intent::PlaceCard { .. } => IntentKind::PlaceCard,
            Intent::TeamAction { .. } => IntentKind::TeamAction,
            Intent::PlaySynergy { .. } => IntentKind::PlaySynergy,
            Intent::ChooseSynergy { .. } => IntentKind::ChooseSynergy,
            Intent::Shoot { .. } => IntentKind::Shoot,
            Intent::AdvanceDuel => IntentKind::AdvanceDuel,
            Intent::Substitute { .. } => IntentKind::Substitute,
            Intent::EndTurn => IntentKind::EndTurn,
            Intent::TakePenalty { .. } => IntentKind::TakePenalty,
        }
    }
}

/// Reject intents the current phases do not allow.
fn check_phase(state: &MatchState, kind: IntentKind) -> GameResult<()> {
    if state.pending_choice.is_some() && kind != IntentKind::ChooseSynergy {
        return Err(GameError::ChoicePending);
    }
    if !phase::accepts(state.phase, state.turn_phase, kind) {
        return Err(GameError::WrongPhase { intent: kind });
    }
    Ok(())
}

/// Apply `intent` to `state`, producing the next snapshot.
///
/// `state` is never modified; on error the caller simply keeps it.
pub fn apply_intent(state: &MatchState, intent: &Intent) -> GameResult<MatchState> {
    log::action("apply_intent", &format!("{:?}", intent));
    let kind = intent.kind();
    if let Err(e) = check_phase(state, kind) {
        log::result(false, &format!("{}", e));
        return Err(e);
    }

    let mut next = state.clone();
    let outcome = match *intent {
        Intent::KickOff => actions::kick_off(&mut next),
        Intent::PlaceCard { card, zone, slot } => actions::place_card(&mut next, card, zone, slot),
        Intent::TeamAction { action } => actions::team_action(&mut next, action),
        Intent::PlaySynergy { synergy } => actions::play_synergy(&mut next, synergy),
        Intent::ChooseSynergy { synergy } => effects::choose_synergy(&mut next, synergy),
        Intent::Shoot { card, zone, slot } => duel::shoot(&mut next, card, zone, slot),
        Intent::AdvanceDuel => duel::advance(&mut next),
        Intent::Substitute {
            incoming,
            outgoing,
            zone,
            slot,
        } => actions::substitute(&mut next, incoming, outgoing, zone, slot),
        Intent::EndTurn => actions::end_turn(&mut next),
        Intent::TakePenalty { card } => penalties::take_penalty(&mut next, card),
    };

    match outcome {
        Ok(()) => {
            log::result(true, &format!("{:?}", kind));
            Ok(next)
        }
        Err(e) => {
            log::result(false, &format!("{}", e));
            Err(e)
        }
    }
}

/// Snapshot holder with an intent history
#[derive(Debug, Clone)]
pub struct MatchEngine {
    initial: MatchState,
    state: MatchState,
    history: Vec<Intent>,
}

impl MatchEngine {
    pub fn new(state: MatchState) -> Self {
        log::info("=== TOUCHLINE MATCH ENGINE INITIALIZED ===");
        Self {
            initial: state.clone(),
            state,
            history: Vec::new(),
        }
    }

    /// Engine over the bundled catalog and squads.
    pub fn standard(seed: u64) -> GameResult<Self> {
        MatchState::standard(seed).map(Self::new)
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn initial_state(&self) -> &MatchState {
        &self.initial
    }

    pub fn history(&self) -> &[Intent] {
        &self.history
    }

    /// Apply an intent; the held snapshot only changes when it succeeds.
    pub fn submit(&mut self, intent: Intent) -> GameResult<&MatchState> {
        self.state = apply_intent(&self.state, &intent)?;
        self.history.push(intent);
        Ok(&self.state)
    }

    pub fn view(&self) -> MatchView {
        MatchView::from_state(&self.state)
    }

    /// SCALE encoding of every accepted intent, in order.
    pub fn encoded_history(&self) -> Vec<u8> {
        self.history.encode()
    }

    /// Re-run an encoded history against `initial`.
    pub fn replay(initial: &MatchState, mut encoded: &[u8]) -> GameResult<MatchState> {
        let intents =
            Vec::<Intent>::decode(&mut encoded).map_err(|_| GameError::MalformedHistory)?;
        intents
            .iter()
            .try_fold(initial.clone(), |state, intent| apply_intent(&state, intent))
    }
}
