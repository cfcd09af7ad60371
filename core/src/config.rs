//! Match configuration
//!
//! Every tunable number of the rules lives here so hosts can adjust them
//! without touching the rule modules.

use alloc::vec;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::types::IconKind;

/// Fixed boundary line of the field carrying printed icons.
///
/// Lines are named in the canonical orientation (home half at the bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BoundaryLine {
    /// Top edge of field zone 0
    AwayDefense,
    /// Bottom edge of field zone 3 (halfway line)
    AwayAttack,
    /// Top edge of field zone 4 (halfway line)
    HomeAttack,
    /// Bottom edge of field zone 7
    HomeDefense,
}

impl BoundaryLine {
    /// Field zone touching this line.
    pub fn field_zone(self) -> u8 {
        match self {
            BoundaryLine::AwayDefense => 0,
            BoundaryLine::AwayAttack => 3,
            BoundaryLine::HomeAttack => 4,
            BoundaryLine::HomeDefense => 7,
        }
    }

    /// Whether the line lies on the top edge of its zone.
    pub fn is_top_edge(self) -> bool {
        matches!(self, BoundaryLine::AwayDefense | BoundaryLine::HomeAttack)
    }
}

/// A printed field icon on a boundary line
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldIcon {
    pub line: BoundaryLine,
    pub kind: IconKind,
    /// Canonical columns (0-7) where the icon is printed
    pub columns: Vec<u8>,
}

/// Rule constants for a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatchConfig {
    /// Turns (both sides counted) in each half
    pub turns_per_half: u32,
    pub placements_per_turn: u8,
    pub shots_per_turn: u8,
    pub substitutions_per_match: u8,
    /// Synergy cards each side draws at kick-off
    pub initial_synergy_hand: u8,
    pub synergy_hand_limit: u8,
    /// Active synergies per side in one duel
    pub max_duel_synergies: u8,
    /// Synergy draws granted per complete pass icon
    pub pass_draw_per_icon: u8,
    /// Control shift per complete press icon, also the snapping grid
    pub press_step: i32,
    /// Attack power per complete attack icon the shooter contributes to
    pub attack_icon_bonus: i32,
    /// Defense power per complete defense icon the defender contributes to
    pub defense_icon_bonus: i32,
    /// Attack bonus while control sits at the attacking side's threshold
    pub control_attack_bonus: i32,
    /// Control position (home view) granting the home control bonus; mirrored for away
    pub control_attack_threshold: i32,
    /// Attack this far below defense goes wide instead of being saved
    pub miss_margin: i32,
    /// Minimum attack power before the AI shoots
    pub ai_shot_threshold: i32,
    /// Match log entries kept before the oldest are evicted
    pub log_capacity: usize,
    pub penalties_on_draw: bool,
    pub penalty_rounds: u8,
    pub max_penalty_rounds: u8,
    pub field_icons: Vec<FieldIcon>,
}

/// Control position at kick-off and after every goal
pub const CONTROL_CENTER: i32 = 50;
/// Upper bound of the control position
pub const CONTROL_MAX: i32 = 100;

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            turns_per_half: 10,
            placements_per_turn: 1,
            shots_per_turn: 1,
            substitutions_per_match: 3,
            initial_synergy_hand: 2,
            synergy_hand_limit: 6,
            max_duel_synergies: 2,
            pass_draw_per_icon: 1,
            press_step: 20,
            attack_icon_bonus: 1,
            defense_icon_bonus: 1,
            control_attack_bonus: 1,
            control_attack_threshold: 80,
            miss_margin: 3,
            ai_shot_threshold: 6,
            log_capacity: 50,
            penalties_on_draw: true,
            penalty_rounds: 5,
            max_penalty_rounds: 10,
            field_icons: default_field_icons(),
        }
    }
}

/// Goal mouths carry defense icons, the centre circle attack icons.
pub fn default_field_icons() -> Vec<FieldIcon> {
    vec![
        FieldIcon {
            line: BoundaryLine::AwayDefense,
            kind: IconKind::Defense,
            columns: vec![3, 4],
        },
        FieldIcon {
            line: BoundaryLine::AwayAttack,
            kind: IconKind::Attack,
            columns: vec![3, 4],
        },
        FieldIcon {
            line: BoundaryLine::HomeAttack,
            kind: IconKind::Attack,
            columns: vec![3, 4],
        },
        FieldIcon {
            line: BoundaryLine::HomeDefense,
            kind: IconKind::Defense,
            columns: vec![3, 4],
        },
    ]
}
