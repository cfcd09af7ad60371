//! Card and icon types
//!
//! Catalog entries (athletes and synergies) plus the small enums every rule
//! module shares. Catalog entries are immutable once loaded; the field only
//! ever stores their ids.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

/// Unique identifier for athlete cards
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Encode,
    Decode,
    TypeInfo,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct CardId(pub u32);

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unique identifier for synergy cards
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Encode,
    Decode,
    TypeInfo,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct SynergyId(pub u32);

impl fmt::Display for SynergyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

/// One of the two teams
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, TypeInfo, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Home, Side::Away];

    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    /// Direction in which this side pushes the control position.
    pub fn control_direction(self) -> i32 {
        match self {
            Side::Home => 1,
            Side::Away => -1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Home => f.write_str("home"),
            Side::Away => f.write_str("away"),
        }
    }
}

/// Playing role of an athlete
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Forward,
    Midfielder,
    Defender,
}

/// Kind of a tactical icon
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, TypeInfo, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum IconKind {
    Attack,
    Defense,
    Pass,
    Press,
}

impl IconKind {
    pub const ALL: [IconKind; 4] = [
        IconKind::Attack,
        IconKind::Defense,
        IconKind::Pass,
        IconKind::Press,
    ];
}

impl fmt::Display for IconKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IconKind::Attack => f.write_str("attack"),
            IconKind::Defense => f.write_str("defense"),
            IconKind::Pass => f.write_str("pass"),
            IconKind::Press => f.write_str("press"),
        }
    }
}

/// Edge position of a half-icon on a two-slot card.
///
/// `LeftTop`/`RightTop` sit on the top edge above the card's left/right slot,
/// `LeftBottom`/`RightBottom` on the bottom edge, and the two `Middle`
/// positions on the side edges. A card's top edge faces its attacking
/// direction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, TypeInfo, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum IconPosition {
    LeftTop,
    LeftMiddle,
    LeftBottom,
    RightTop,
    RightMiddle,
    RightBottom,
}

impl IconPosition {
    pub const ALL: [IconPosition; 6] = [
        IconPosition::LeftTop,
        IconPosition::LeftMiddle,
        IconPosition::LeftBottom,
        IconPosition::RightTop,
        IconPosition::RightMiddle,
        IconPosition::RightBottom,
    ];

    pub fn index(self) -> usize {
        match self {
            IconPosition::LeftTop => 0,
            IconPosition::LeftMiddle => 1,
            IconPosition::LeftBottom => 2,
            IconPosition::RightTop => 3,
            IconPosition::RightMiddle => 4,
            IconPosition::RightBottom => 5,
        }
    }

    /// The position this one ends up in after a 180° turn of the card.
    pub fn rotated(self) -> IconPosition {
        match self {
            IconPosition::LeftTop => IconPosition::RightBottom,
            IconPosition::LeftMiddle => IconPosition::RightMiddle,
            IconPosition::LeftBottom => IconPosition::RightTop,
            IconPosition::RightTop => IconPosition::LeftBottom,
            IconPosition::RightMiddle => IconPosition::LeftMiddle,
            IconPosition::RightBottom => IconPosition::LeftTop,
        }
    }

    pub fn is_top(self) -> bool {
        matches!(self, IconPosition::LeftTop | IconPosition::RightTop)
    }

    pub fn is_bottom(self) -> bool {
        matches!(self, IconPosition::LeftBottom | IconPosition::RightBottom)
    }

    /// Column offset (0 or 1) of a top/bottom position within the card.
    pub fn column_offset(self) -> u8 {
        match self {
            IconPosition::LeftTop | IconPosition::LeftMiddle | IconPosition::LeftBottom => 0,
            _ => 1,
        }
    }
}

/// The six optional half-icons of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeIcons([Option<IconKind>; 6]);

impl EdgeIcons {
    pub fn none() -> Self {
        Self([None; 6])
    }

    pub fn with(mut self, position: IconPosition, kind: IconKind) -> Self {
        self.0[position.index()] = Some(kind);
        self
    }

    pub fn get(&self, position: IconPosition) -> Option<IconKind> {
        self.0[position.index()]
    }

    pub fn count(&self, kind: IconKind) -> usize {
        self.0.iter().filter(|icon| **icon == Some(kind)).count()
    }

    /// Positions holding `kind`, in canonical position order.
    pub fn positions_of(&self, kind: IconKind) -> impl Iterator<Item = IconPosition> + '_ {
        IconPosition::ALL
            .into_iter()
            .filter(move |position| self.get(*position) == Some(kind))
    }

    /// Attack-icon index of the attack half-icon at `position`, if any.
    pub fn attack_index_of(&self, position: IconPosition) -> Option<u8> {
        self.positions_of(IconKind::Attack)
            .position(|p| p == position)
            .map(|i| i as u8)
    }
}

/// Set of local zones (0 = attack line .. 3 = defense line) a card may occupy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneSet(u8);

impl ZoneSet {
    pub const ALL: ZoneSet = ZoneSet(0b1111);

    pub fn from_zones(zones: &[u8]) -> Self {
        Self(zones.iter().filter(|z| **z < 4).fold(0, |acc, z| acc | (1 << z)))
    }

    pub fn contains(&self, zone: u8) -> bool {
        zone < 4 && self.0 & (1 << zone) != 0
    }

    pub fn zones(&self) -> Vec<u8> {
        (0..4).filter(|z| self.contains(*z)).collect()
    }
}

/// One-shot effect fired when an athlete is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ImmediateEffect {
    #[default]
    None,
    /// Draw synergy cards from the deck
    DrawSynergy { count: u8 },
    /// Reveal synergy cards and keep one of them
    DrawSynergyChoose { count: u8 },
    /// Take the best synergy card from the opponent's hand
    StealSynergy,
    /// This card may shoot this turn outside the shot budget
    InstantShot,
    /// This card's next shot this turn faces no defender
    IgnoreDefense,
    /// Push the control position toward the placing side
    MoveControl { steps: u8 },
}

/// An athlete card in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AthleteCard {
    pub id: CardId,
    pub name: String,
    pub short_name: String,
    pub role: Role,
    pub base_power: i32,
    pub icons: EdgeIcons,
    pub zones: ZoneSet,
    #[serde(default)]
    pub effect: ImmediateEffect,
}

impl AthleteCard {
    pub fn new(id: CardId, name: &str, role: Role, base_power: i32) -> Self {
        let zones = match role {
            Role::Forward => ZoneSet::from_zones(&[0, 1]),
            Role::Midfielder => ZoneSet::from_zones(&[1, 2]),
            Role::Defender => ZoneSet::from_zones(&[2, 3]),
        };
        Self {
            id,
            name: name.to_string(),
            short_name: name.to_string(),
            role,
            base_power,
            icons: EdgeIcons::none(),
            zones,
            effect: ImmediateEffect::None,
        }
    }

    pub fn with_short_name(mut self, short_name: &str) -> Self {
        self.short_name = short_name.to_string();
        self
    }

    pub fn with_icon(mut self, position: IconPosition, kind: IconKind) -> Self {
        self.icons = self.icons.with(position, kind);
        self
    }

    pub fn with_zones(mut self, zones: &[u8]) -> Self {
        self.zones = ZoneSet::from_zones(zones);
        self
    }

    pub fn with_effect(mut self, effect: ImmediateEffect) -> Self {
        self.effect = effect;
        self
    }

    pub fn attack_icon_count(&self) -> usize {
        self.icons.count(IconKind::Attack)
    }

    pub fn defense_icon_count(&self) -> usize {
        self.icons.count(IconKind::Defense)
    }
}

/// Synergy card categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SynergyType {
    Attack,
    Defense,
    Special,
    Tackle,
    SetPiece,
}

impl SynergyType {
    /// Types the shooting side may activate before a shot.
    pub fn usable_by_attacker(self) -> bool {
        matches!(
            self,
            SynergyType::Attack | SynergyType::Special | SynergyType::SetPiece
        )
    }

    /// Types the defending side may activate during a duel.
    pub fn usable_by_defender(self) -> bool {
        matches!(
            self,
            SynergyType::Defense | SynergyType::Special | SynergyType::Tackle
        )
    }
}

impl fmt::Display for SynergyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynergyType::Attack => f.write_str("attack"),
            SynergyType::Defense => f.write_str("defense"),
            SynergyType::Special => f.write_str("special"),
            SynergyType::Tackle => f.write_str("tackle"),
            SynergyType::SetPiece => f.write_str("set piece"),
        }
    }
}

/// A consumable synergy card
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynergyCard {
    pub id: SynergyId,
    pub name: String,
    pub synergy_type: SynergyType,
    pub stars: i32,
}

impl SynergyCard {
    pub fn new(id: SynergyId, name: &str, synergy_type: SynergyType, stars: i32) -> Self {
        Self {
            id,
            name: name.to_string(),
            synergy_type,
            stars,
        }
    }
}

/// Squad selection for one side: starters go to the hand, the rest to the bench
#[derive(Debug, Clone, PartialEq, Eq, Default, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Squad {
    pub starters: Vec<CardId>,
    pub bench: Vec<CardId>,
}
