//! Field model
//!
//! Each side owns a grid of four zones by eight slots, indexed from its own
//! point of view: local zone 0 is the attack line (nearest the opponent) and
//! local zone 3 the defense line. A placed card covers its start slot and the
//! slot to its right.
//!
//! Zones are held behind `Arc` and only copied on write, so cloning a grid
//! (and therefore a whole match snapshot) shares every zone that the next
//! mutation does not touch.

use alloc::sync::Arc;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::types::{CardId, Side};

/// Zones per grid
pub const GRID_ZONES: u8 = 4;
/// Slots per zone
pub const ZONE_SLOTS: u8 = 8;
/// Highest legal start slot for a two-slot card
pub const MAX_START_SLOT: u8 = ZONE_SLOTS - 2;
/// Local index of the attack line
pub const FRONT_ZONE: u8 = 0;
/// Local index of the zone directly behind the attack line
pub const SUPPORT_ZONE: u8 = 1;
/// Zones across both halves in canonical orientation
pub const FIELD_ZONES: u8 = GRID_ZONES * 2;

/// A single slot of a zone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub card: Option<CardId>,
    /// Shots taken by the occupant this half (kept on the start slot)
    pub shot_markers: u8,
}

/// One band of eight slots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub slots: [Slot; ZONE_SLOTS as usize],
}

/// Where a card sits on its owner's grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub card: CardId,
    pub zone: u8,
    pub start: u8,
}

/// One side's 4x8 grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    zones: [Arc<Zone>; GRID_ZONES as usize],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        Self {
            zones: core::array::from_fn(|_| Arc::new(Zone::default())),
        }
    }

    pub fn zone(&self, zone: u8) -> Option<&Zone> {
        self.zones.get(zone as usize).map(|z| z.as_ref())
    }

    pub fn slot(&self, zone: u8, slot: u8) -> Option<&Slot> {
        self.zone(zone).and_then(|z| z.slots.get(slot as usize))
    }

    pub fn card_at(&self, zone: u8, slot: u8) -> Option<CardId> {
        self.slot(zone, slot).and_then(|s| s.card)
    }

    /// Occupancy check that treats out-of-range coordinates as empty.
    pub fn is_occupied(&self, zone: i32, slot: i32) -> bool {
        if zone < 0 || slot < 0 {
            return false;
        }
        self.card_at(zone as u8, slot as u8).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.zones
            .iter()
            .all(|zone| zone.slots.iter().all(|slot| slot.card.is_none()))
    }

    /// Every placement on the grid, ordered by zone then start slot.
    pub fn placements(&self) -> Vec<Placement> {
        let mut placements = Vec::new();
        for (z, zone) in self.zones.iter().enumerate() {
            let mut previous: Option<CardId> = None;
            for (i, slot) in zone.slots.iter().enumerate() {
                if let Some(card) = slot.card {
                    if previous != Some(card) {
                        debug_assert!(
                            zone.slots.get(i + 1).and_then(|s| s.card) == Some(card),
                            "card {} must cover two adjacent slots",
                            card
                        );
                        placements.push(Placement {
                            card,
                            zone: z as u8,
                            start: i as u8,
                        });
                    }
                }
                previous = slot.card;
            }
        }
        placements
    }

    pub fn find(&self, card: CardId) -> Option<Placement> {
        self.placements().into_iter().find(|p| p.card == card)
    }

    pub fn contains(&self, card: CardId) -> bool {
        self.find(card).is_some()
    }

    pub fn card_count(&self) -> usize {
        self.placements().len()
    }

    /// Put a card on two free slots. Callers validate the placement first.
    pub fn place(&mut self, card: CardId, zone: u8, start: u8) {
        debug_assert!(zone < GRID_ZONES && start <= MAX_START_SLOT);
        debug_assert!(!self.contains(card), "card {} is already on the grid", card);
        let zone = Arc::make_mut(&mut self.zones[zone as usize]);
        for slot in &mut zone.slots[start as usize..=start as usize + 1] {
            debug_assert!(slot.card.is_none(), "placing onto an occupied slot");
            slot.card = Some(card);
            slot.shot_markers = 0;
        }
    }

    /// Swap `incoming` into the slots held by `outgoing`.
    pub fn replace(&mut self, outgoing: CardId, incoming: CardId) -> Option<Placement> {
        let placement = self.find(outgoing)?;
        debug_assert!(!self.contains(incoming));
        let zone = Arc::make_mut(&mut self.zones[placement.zone as usize]);
        for slot in &mut zone.slots[placement.start as usize..=placement.start as usize + 1] {
            slot.card = Some(incoming);
            slot.shot_markers = 0;
        }
        Some(Placement {
            card: incoming,
            ..placement
        })
    }

    pub fn shot_markers(&self, card: CardId) -> u8 {
        self.find(card)
            .and_then(|p| self.slot(p.zone, p.start))
            .map(|s| s.shot_markers)
            .unwrap_or(0)
    }

    pub fn add_shot_marker(&mut self, card: CardId) {
        if let Some(p) = self.find(card) {
            let zone = Arc::make_mut(&mut self.zones[p.zone as usize]);
            let slot = &mut zone.slots[p.start as usize];
            slot.shot_markers = slot.shot_markers.saturating_add(1);
        }
    }

    /// Reset all shot markers, copying only the zones that carry any.
    pub fn clear_shot_markers(&mut self) {
        for zone in self.zones.iter_mut() {
            if zone.slots.iter().any(|s| s.shot_markers > 0) {
                for slot in Arc::make_mut(zone).slots.iter_mut() {
                    slot.shot_markers = 0;
                }
            }
        }
    }

    /// True when both grids hold the very same zone allocation.
    pub fn shares_zone_with(&self, other: &Grid, zone: u8) -> bool {
        match (self.zones.get(zone as usize), other.zones.get(zone as usize)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Both grids of a match
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub home: Grid,
    pub away: Grid,
}

impl Field {
    pub fn grid(&self, side: Side) -> &Grid {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn grid_mut(&mut self, side: Side) -> &mut Grid {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }
}

/// Canonical field zone (0-7, away half first) of a side's local zone.
pub fn field_zone(side: Side, local_zone: u8) -> u8 {
    match side {
        Side::Home => GRID_ZONES + local_zone,
        Side::Away => GRID_ZONES - 1 - local_zone,
    }
}

/// Canonical column of a side's local column.
pub fn field_column(side: Side, local_column: u8) -> u8 {
    match side {
        Side::Home => local_column,
        Side::Away => ZONE_SLOTS - 1 - local_column,
    }
}

/// Canonical left column of a placement starting at `local_start`.
pub fn field_start(side: Side, local_start: u8) -> u8 {
    match side {
        Side::Home => local_start,
        Side::Away => MAX_START_SLOT - local_start,
    }
}
