//! Placement legality
//!
//! Pure checks deciding whether a card may be put on a grid. Nothing here
//! mutates; the engine applies a placement only after it validates.

use crate::error::{GameError, GameResult};
use crate::field::{Grid, FRONT_ZONE, GRID_ZONES, MAX_START_SLOT, SUPPORT_ZONE};
use crate::types::AthleteCard;

/// Validate placing `card` on `grid` at (`zone`, `start`).
///
/// Rules are checked in order: zone exists, start slot in range, card
/// eligible for the zone, both slots free, and finally the attack line
/// support rule. `is_first_placement` marks the very first card on the grid;
/// it can never go to the attack line.
pub fn validate_placement(
    card: &AthleteCard,
    grid: &Grid,
    zone: u8,
    start: u8,
    is_first_placement: bool,
) -> GameResult<()> {
    if zone >= GRID_ZONES {
        return Err(GameError::InvalidZone { zone });
    }
    if start > MAX_START_SLOT {
        return Err(GameError::InvalidSlot { slot: start });
    }
    if !card.zones.contains(zone) {
        return Err(GameError::ZoneNotEligible {
            card: card.id,
            zone,
        });
    }
    for slot in [start, start + 1] {
        if grid.card_at(zone, slot).is_some() {
            return Err(GameError::SlotOccupied { zone, slot });
        }
    }

    if zone == FRONT_ZONE {
        if is_first_placement || grid.is_empty() {
            return Err(GameError::MustBuildFromBack);
        }
        if !has_support(grid, zone, start) {
            return Err(GameError::NoSupport { zone, slot: start });
        }
    }

    Ok(())
}

/// An attack line card needs a neighbour in its own zone (touching either
/// side) or a card in the supporting zone within one slot of its span.
pub fn has_support(grid: &Grid, zone: u8, start: u8) -> bool {
    let zone = zone as i32;
    let start = start as i32;

    let beside = grid.is_occupied(zone, start - 1) || grid.is_occupied(zone, start + 2);
    let behind = (start - 1..=start + 2).any(|slot| grid.is_occupied(SUPPORT_ZONE as i32, slot));

    beside || behind
}

/// Every legal start slot for `card` in `zone`, left to right.
pub fn legal_starts<'a>(
    card: &'a AthleteCard,
    grid: &'a Grid,
    zone: u8,
) -> impl Iterator<Item = u8> + 'a {
    let first = grid.is_empty();
    (0..=MAX_START_SLOT).filter(move |start| validate_placement(card, grid, zone, *start, first).is_ok())
}
