//! Tactical icon matching
//!
//! Scans both grids and pairs half-icons into complete icons. All geometry is
//! done in the canonical orientation (home half at the bottom, field zones
//! 0-7, columns 0-7 from home's left). Away cards are turned by 180°, so their
//! catalog positions are mapped through [`IconPosition::rotated`] before any
//! comparison.
//!
//! Pairings are gathered as candidates with a priority tier:
//!
//! | tier | family     | pairing                                               |
//! |------|------------|-------------------------------------------------------|
//! | 0    | horizontal | facing side edges of two cards sharing a seam         |
//! | 1    | vertical   | bottom half of the upper card over the top half below |
//! | 2    | vertical   | same, one column apart                                |
//! | 3    | horizontal | back-edge halves meeting at a seam                    |
//! | 4    | boundary   | a half facing a printed field icon                    |
//!
//! Candidates are accepted greedily in (tier, centre, halves) order. A
//! half-icon completes at most one icon, and two halves of the same card never
//! complete one. The candidate key depends only on positions, so the result
//! is the same whatever order the cards were placed or scanned in.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::cards::Catalog;
use crate::config::{FieldIcon, MatchConfig};
use crate::field::{field_start, field_zone, Field, GRID_ZONES};
use crate::types::{AthleteCard, CardId, IconKind, IconPosition, Side};

/// How a complete icon was formed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MatchFamily {
    Horizontal,
    Vertical,
    Boundary,
}

/// Logical centre of a complete icon in half-slot units.
///
/// `row = 2 * zone` is a zone's top edge, `+1` its middle, `+2` its bottom
/// edge; `col = 2 * column + 1` is a column centre and `2 * column` the seam
/// left of that column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, TypeInfo, Serialize, Deserialize,
)]
pub struct IconCenter {
    pub row: u8,
    pub col: u8,
}

/// One contributing half-icon, by catalog position on its card
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Encode, Decode, TypeInfo, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct HalfIconRef {
    pub side: Side,
    pub card: CardId,
    pub position: IconPosition,
}

/// A gameplay-active icon
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteIcon {
    pub kind: IconKind,
    pub family: MatchFamily,
    pub side: Side,
    pub center: IconCenter,
    pub first: HalfIconRef,
    /// `None` for boundary icons, whose other half is printed on the field
    pub second: Option<HalfIconRef>,
}

impl CompleteIcon {
    pub fn involves(&self, side: Side, card: CardId) -> bool {
        let hit = |half: &HalfIconRef| half.side == side && half.card == card;
        hit(&self.first) || self.second.as_ref().map_or(false, hit)
    }
}

/// Complete icon counts per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode, TypeInfo, Serialize, Deserialize)]
pub struct KindCounts {
    pub attack: u32,
    pub defense: u32,
    pub pass: u32,
    pub press: u32,
}

impl KindCounts {
    pub fn get(&self, kind: IconKind) -> u32 {
        match kind {
            IconKind::Attack => self.attack,
            IconKind::Defense => self.defense,
            IconKind::Pass => self.pass,
            IconKind::Press => self.press,
        }
    }

    fn add(&mut self, kind: IconKind) {
        match kind {
            IconKind::Attack => self.attack += 1,
            IconKind::Defense => self.defense += 1,
            IconKind::Pass => self.pass += 1,
            IconKind::Press => self.press += 1,
        }
    }
}

/// Result of a scan
#[derive(Debug, Clone, PartialEq, Eq, Default, Encode, Decode, TypeInfo, Serialize, Deserialize)]
pub struct IconReport {
    /// Sorted by centre
    pub icons: Vec<CompleteIcon>,
    pub totals: KindCounts,
    pub home: KindCounts,
    pub away: KindCounts,
}

impl IconReport {
    pub fn for_side(&self, side: Side) -> &KindCounts {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    /// Complete icons of `kind` on `side`'s half.
    pub fn count(&self, side: Side, kind: IconKind) -> u32 {
        self.for_side(side).get(kind)
    }

    /// Complete icons of `kind` that `card` contributes a half to.
    pub fn count_for(&self, side: Side, card: CardId, kind: IconKind) -> u32 {
        self.icons
            .iter()
            .filter(|icon| icon.kind == kind && icon.involves(side, card))
            .count() as u32
    }

    pub fn of_kind(&self, kind: IconKind) -> impl Iterator<Item = &CompleteIcon> {
        self.icons.iter().filter(move |icon| icon.kind == kind)
    }

    fn push(&mut self, icon: CompleteIcon) {
        self.totals.add(icon.kind);
        match icon.side {
            Side::Home => self.home.add(icon.kind),
            Side::Away => self.away.add(icon.kind),
        }
        self.icons.push(icon);
    }
}

/// A card on the field in canonical coordinates
struct PlacedCard<'a> {
    side: Side,
    card: &'a AthleteCard,
    row: u8,
    col: u8,
}

impl PlacedCard<'_> {
    fn catalog_position(&self, physical: IconPosition) -> IconPosition {
        match self.side {
            Side::Home => physical,
            Side::Away => physical.rotated(),
        }
    }

    /// Half-icon showing at a physical (canonical) position.
    fn at(&self, physical: IconPosition) -> Option<IconKind> {
        self.card.icons.get(self.catalog_position(physical))
    }

    fn half(&self, physical: IconPosition) -> HalfIconRef {
        HalfIconRef {
            side: self.side,
            card: self.card.id,
            position: self.catalog_position(physical),
        }
    }

    fn column_of(&self, physical: IconPosition) -> u8 {
        self.col + physical.column_offset()
    }
}

struct Candidate {
    tier: u8,
    kind: IconKind,
    family: MatchFamily,
    side: Side,
    center: IconCenter,
    first: HalfIconRef,
    second: Option<HalfIconRef>,
}

impl Candidate {
    fn key(&self) -> (u8, IconCenter, HalfIconRef, Option<HalfIconRef>) {
        (self.tier, self.center, self.first, self.second)
    }
}

/// Derive every complete icon on the field. Read-only.
pub fn scan(field: &Field, catalog: &Catalog, config: &MatchConfig) -> IconReport {
    let placed = collect(field, catalog);

    let mut candidates = Vec::new();
    horizontal_candidates(&placed, &mut candidates);
    vertical_candidates(&placed, &mut candidates);
    boundary_candidates(&placed, &config.field_icons, &mut candidates);
    candidates.sort_by(|a, b| a.key().cmp(&b.key()));

    let mut consumed: BTreeSet<HalfIconRef> = BTreeSet::new();
    let mut report = IconReport::default();
    for candidate in candidates {
        if let Some(second) = candidate.second {
            if second.side == candidate.first.side && second.card == candidate.first.card {
                continue;
            }
            if consumed.contains(&second) {
                continue;
            }
        }
        if consumed.contains(&candidate.first) {
            continue;
        }

        consumed.insert(candidate.first);
        if let Some(second) = candidate.second {
            consumed.insert(second);
        }
        report.push(CompleteIcon {
            kind: candidate.kind,
            family: candidate.family,
            side: candidate.side,
            center: candidate.center,
            first: candidate.first,
            second: candidate.second,
        });
    }

    report.icons.sort_by_key(|icon| (icon.center, icon.first));
    report
}

fn collect<'a>(field: &Field, catalog: &'a Catalog) -> Vec<PlacedCard<'a>> {
    let mut placed = Vec::new();
    for side in Side::ALL {
        for placement in field.grid(side).placements() {
            match catalog.athlete(placement.card) {
                Some(card) => placed.push(PlacedCard {
                    side,
                    card,
                    row: field_zone(side, placement.zone),
                    col: field_start(side, placement.start),
                }),
                None => crate::log::warn("icon scan skipped a card missing from the catalog"),
            }
        }
    }
    placed
}

fn is_home_half(row: u8) -> bool {
    row >= GRID_ZONES
}

fn horizontal_candidates(placed: &[PlacedCard<'_>], out: &mut Vec<Candidate>) {
    for left in placed {
        for right in placed {
            if left.row != right.row || right.col != left.col + 2 {
                continue;
            }
            let seam = 2 * right.col;

            if let Some(kind) = left.at(IconPosition::RightMiddle) {
                if right.at(IconPosition::LeftMiddle) == Some(kind) {
                    out.push(Candidate {
                        tier: 0,
                        kind,
                        family: MatchFamily::Horizontal,
                        side: left.side,
                        center: IconCenter {
                            row: 2 * left.row + 1,
                            col: seam,
                        },
                        first: left.half(IconPosition::RightMiddle),
                        second: Some(right.half(IconPosition::LeftMiddle)),
                    });
                }
            }

            // Back edge: bottom for the home half, top (mirrored) for the away half.
            let (left_pos, right_pos, row) = if is_home_half(left.row) {
                (
                    IconPosition::RightBottom,
                    IconPosition::LeftBottom,
                    2 * left.row + 2,
                )
            } else {
                (IconPosition::RightTop, IconPosition::LeftTop, 2 * left.row)
            };
            if let Some(kind) = left.at(left_pos) {
                if right.at(right_pos) == Some(kind) {
                    out.push(Candidate {
                        tier: 3,
                        kind,
                        family: MatchFamily::Horizontal,
                        side: left.side,
                        center: IconCenter { row, col: seam },
                        first: left.half(left_pos),
                        second: Some(right.half(right_pos)),
                    });
                }
            }
        }
    }
}

fn vertical_candidates(placed: &[PlacedCard<'_>], out: &mut Vec<Candidate>) {
    const BOTTOMS: [IconPosition; 2] = [IconPosition::LeftBottom, IconPosition::RightBottom];
    const TOPS: [IconPosition; 2] = [IconPosition::LeftTop, IconPosition::RightTop];

    for upper in placed {
        for lower in placed {
            // Neighbouring zones of one half; the halfway line is a boundary.
            if lower.row != upper.row + 1 || is_home_half(upper.row) != is_home_half(lower.row) {
                continue;
            }
            for up_pos in BOTTOMS {
                let Some(kind) = upper.at(up_pos) else {
                    continue;
                };
                let up_col = upper.column_of(up_pos);
                for low_pos in TOPS {
                    if lower.at(low_pos) != Some(kind) {
                        continue;
                    }
                    let low_col = lower.column_of(low_pos);
                    let tier = match up_col.abs_diff(low_col) {
                        0 => 1,
                        1 => 2,
                        _ => continue,
                    };
                    out.push(Candidate {
                        tier,
                        kind,
                        family: MatchFamily::Vertical,
                        side: upper.side,
                        center: IconCenter {
                            row: 2 * lower.row,
                            col: up_col + low_col + 1,
                        },
                        first: upper.half(up_pos),
                        second: Some(lower.half(low_pos)),
                    });
                }
            }
        }
    }
}

fn boundary_candidates(placed: &[PlacedCard<'_>], field_icons: &[FieldIcon], out: &mut Vec<Candidate>) {
    for icon in field_icons {
        let row = icon.line.field_zone();
        let (positions, edge_row) = if icon.line.is_top_edge() {
            ([IconPosition::LeftTop, IconPosition::RightTop], 2 * row)
        } else {
            ([IconPosition::LeftBottom, IconPosition::RightBottom], 2 * row + 2)
        };
        for card in placed.iter().filter(|p| p.row == row) {
            for position in positions {
                let col = card.column_of(position);
                if icon.columns.contains(&col) && card.at(position) == Some(icon.kind) {
                    out.push(Candidate {
                        tier: 4,
                        kind: icon.kind,
                        family: MatchFamily::Boundary,
                        side: card.side,
                        center: IconCenter {
                            row: edge_row,
                            col: 2 * col + 1,
                        },
                        first: card.half(position),
                        second: None,
                    });
                }
            }
        }
    }
}
