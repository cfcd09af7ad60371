//! Match and turn phases
//!
//! Two layers of state decide which intents are legal: the match phase
//! (halves, breaks, shootout) and, while a half is being played, the turn
//! phase of the side on the ball.

use core::fmt;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Phase of the whole match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchPhase {
    /// Squads picked, waiting for kick-off
    Draft,
    FirstHalf,
    HalfTime,
    SecondHalf,
    FullTime,
    /// Penalty shootout after a level second half
    Penalty,
}

impl MatchPhase {
    pub fn is_in_play(self) -> bool {
        matches!(self, MatchPhase::FirstHalf | MatchPhase::SecondHalf)
    }

    pub fn is_over(self) -> bool {
        self == MatchPhase::FullTime
    }
}

impl fmt::Display for MatchPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchPhase::Draft => "draft",
            MatchPhase::FirstHalf => "first half",
            MatchPhase::HalfTime => "half time",
            MatchPhase::SecondHalf => "second half",
            MatchPhase::FullTime => "full time",
            MatchPhase::Penalty => "penalties",
        };
        f.write_str(name)
    }
}

/// Sub-phase of a single turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TurnPhase {
    /// Transient; resolved as soon as a turn begins
    Start,
    /// Waiting for the team action (pass or press)
    TeamAction,
    /// Placements, synergies, shots and substitutions
    PlayerAction,
    /// A duel is being resolved
    Shooting,
    /// Transient; the turn is being handed over
    End,
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TurnPhase::Start => "start",
            TurnPhase::TeamAction => "team action",
            TurnPhase::PlayerAction => "player action",
            TurnPhase::Shooting => "shooting",
            TurnPhase::End => "end",
        };
        f.write_str(name)
    }
}

/// Discriminant of an intent, used for phase checks and error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntentKind {
    KickOff,
    PlaceCard,
    TeamAction,
    PlaySynergy,
    ChooseSynergy,
    Shoot,
    AdvanceDuel,
    Substitute,
    EndTurn,
    TakePenalty,
}

impl TurnPhase {
    /// Whether an in-play intent is allowed in this turn phase.
    pub fn accepts(self, kind: IntentKind) -> bool {
        match self {
            TurnPhase::TeamAction => matches!(kind, IntentKind::TeamAction | IntentKind::EndTurn),
            TurnPhase::PlayerAction => matches!(
                kind,
                IntentKind::PlaceCard
                    | IntentKind::PlaySynergy
                    | IntentKind::ChooseSynergy
                    | IntentKind::Shoot
                    | IntentKind::Substitute
                    | IntentKind::EndTurn
            ),
            TurnPhase::Shooting => {
                matches!(kind, IntentKind::AdvanceDuel | IntentKind::PlaySynergy)
            }
            TurnPhase::Start | TurnPhase::End => false,
        }
    }

    pub fn can_place_card(self) -> bool {
        self.accepts(IntentKind::PlaceCard)
    }

    pub fn can_perform_team_action(self) -> bool {
        self.accepts(IntentKind::TeamAction)
    }

    pub fn can_shoot(self) -> bool {
        self.accepts(IntentKind::Shoot)
    }

    pub fn can_substitute(self) -> bool {
        self.accepts(IntentKind::Substitute)
    }

    pub fn can_advance_duel(self) -> bool {
        self.accepts(IntentKind::AdvanceDuel)
    }

    pub fn can_end_turn(self) -> bool {
        self.accepts(IntentKind::EndTurn)
    }

    /// Where a freshly started turn settles.
    ///
    /// The opening turn of the match skips the team action when the side has
    /// nothing to pass or press with.
    pub fn after_start(is_first_turn: bool, pass_or_press_icons: u32) -> TurnPhase {
        if is_first_turn && pass_or_press_icons == 0 {
            TurnPhase::PlayerAction
        } else {
            TurnPhase::TeamAction
        }
    }
}

/// Whether `kind` is legal given both phase layers.
///
/// Outside a half only the break intents are accepted; during a half the
/// turn phase decides.
pub fn accepts(phase: MatchPhase, turn_phase: TurnPhase, kind: IntentKind) -> bool {
    match phase {
        MatchPhase::Draft | MatchPhase::HalfTime => kind == IntentKind::KickOff,
        MatchPhase::Penalty => kind == IntentKind::TakePenalty,
        MatchPhase::FullTime => false,
        MatchPhase::FirstHalf | MatchPhase::SecondHalf => turn_phase.accepts(kind),
    }
}
