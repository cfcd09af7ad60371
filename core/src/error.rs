//! Error types for match operations
//!
//! Every rejected intent is reported through `GameError`. Rejections are
//! never fatal: the caller keeps the snapshot it submitted against.

use core::fmt;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::phase::IntentKind;
use crate::types::{CardId, SynergyId, SynergyType};

/// Reasons an intent can be rejected
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameError {
    /// Intent not accepted in the current phase
    WrongPhase { intent: IntentKind },
    /// A synergy choice must be resolved first
    ChoicePending,
    /// No synergy choice is waiting
    NoChoicePending,
    /// A duel is still being resolved
    DuelInProgress,
    /// No duel is pending
    NoDuelPending,
    /// Zone index outside the grid
    InvalidZone { zone: u8 },
    /// Start slot outside [0, 6]
    InvalidSlot { slot: u8 },
    /// Card may not be placed in this zone
    ZoneNotEligible { card: CardId, zone: u8 },
    /// One of the target slots is taken
    SlotOccupied { zone: u8, slot: u8 },
    /// The attack line cannot be the first zone filled
    MustBuildFromBack,
    /// Attack line placement without a neighbouring card
    NoSupport { zone: u8, slot: u8 },
    /// Card id is not in the catalog
    UnknownCard { card: CardId },
    /// Card is not in the acting side's hand
    CardNotInHand { card: CardId },
    /// Card is not on the acting side's bench
    CardNotOnBench { card: CardId },
    /// Card is not at the referenced position
    CardNotAtPosition { card: CardId, zone: u8, slot: u8 },
    /// Card appears more than once across the squads
    DuplicateCard { card: CardId },
    /// Synergy card is not available to the acting side
    SynergyNotInHand { synergy: SynergyId },
    /// Synergy type cannot be played in this role
    SynergyNotAllowed { synergy_type: SynergyType },
    /// Active synergy limit reached
    SynergyLimitReached,
    /// Placement budget for this turn spent
    PlacementLimitReached,
    /// Shot budget for this turn spent
    ShotLimitReached,
    /// Every attack icon of this card is used this half
    NoUnusedShotIcon { card: CardId },
    /// No substitutions remaining
    NoSubstitutionsLeft,
    /// Card cannot take the next penalty
    PenaltyTakerUnavailable { card: CardId },
    /// Encoded intent history could not be decoded
    MalformedHistory,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::WrongPhase { intent } => {
                write!(f, "{:?} is not allowed in the current phase", intent)
            }
            GameError::ChoicePending => f.write_str("Choose a synergy card first"),
            GameError::NoChoicePending => f.write_str("There is no synergy choice to make"),
            GameError::DuelInProgress => f.write_str("A duel is still in progress"),
            GameError::NoDuelPending => f.write_str("There is no duel to advance"),
            GameError::InvalidZone { zone } => write!(f, "Zone {} does not exist", zone),
            GameError::InvalidSlot { slot } => {
                write!(f, "Slot {} is not a valid starting slot", slot)
            }
            GameError::ZoneNotEligible { card, zone } => {
                write!(f, "Card {} cannot be placed in zone {}", card, zone)
            }
            GameError::SlotOccupied { zone, slot } => {
                write!(f, "Zone {} slot {} is already occupied", zone, slot)
            }
            GameError::MustBuildFromBack => {
                f.write_str("Must build from the back: the attack line cannot be filled first")
            }
            GameError::NoSupport { zone, slot } => write!(
                f,
                "Zone {} slot {} has no supporting card next to or behind it",
                zone, slot
            ),
            GameError::UnknownCard { card } => write!(f, "Card {} does not exist", card),
            GameError::CardNotInHand { card } => write!(f, "Card {} is not in hand", card),
            GameError::CardNotOnBench { card } => write!(f, "Card {} is not on the bench", card),
            GameError::CardNotAtPosition { card, zone, slot } => {
                write!(f, "Card {} is not at zone {} slot {}", card, zone, slot)
            }
            GameError::DuplicateCard { card } => {
                write!(f, "Card {} is listed more than once", card)
            }
            GameError::SynergyNotInHand { synergy } => {
                write!(f, "Synergy {} is not available", synergy)
            }
            GameError::SynergyNotAllowed { synergy_type } => {
                write!(f, "A {} synergy cannot be played now", synergy_type)
            }
            GameError::SynergyLimitReached => f.write_str("No more synergy cards can be played"),
            GameError::PlacementLimitReached => {
                f.write_str("No placements left this turn")
            }
            GameError::ShotLimitReached => f.write_str("No shots left this turn"),
            GameError::NoUnusedShotIcon { card } => {
                write!(f, "Card {} has no unused attack icon this half", card)
            }
            GameError::NoSubstitutionsLeft => f.write_str("No substitutions left"),
            GameError::PenaltyTakerUnavailable { card } => {
                write!(f, "Card {} cannot take this penalty", card)
            }
            GameError::MalformedHistory => f.write_str("Intent history could not be decoded"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}

/// Result type alias for match operations
pub type GameResult<T> = Result<T, GameError>;
