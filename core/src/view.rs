//! View types for presentation layers
//!
//! A `MatchView` is a flattened, self-contained copy of what a renderer needs:
//! fielded cards with their current powers, hands, the icon report, the duel
//! and the recent log. Unlike `MatchState` it carries no shared catalog and
//! can be SCALE-encoded as well as serialized.

use alloc::string::String;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::duel::{attack_power_with, defense_power_with, Duel};
use crate::field::{field_start, field_zone};
use crate::icons::IconReport;
use crate::match_log::LogEntry;
use crate::penalties::Shootout;
use crate::phase::{MatchPhase, TurnPhase};
use crate::state::{MatchState, SynergyChoice};
use crate::types::{AthleteCard, CardId, Role, Side, SynergyCard};

/// Catalog details of an athlete for display
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    pub id: CardId,
    pub name: String,
    pub short_name: String,
    pub role: Role,
    pub base_power: i32,
}

impl From<&AthleteCard> for CardView {
    fn from(card: &AthleteCard) -> Self {
        Self {
            id: card.id,
            name: card.name.clone(),
            short_name: card.short_name.clone(),
            role: card.role,
            base_power: card.base_power,
        }
    }
}

/// A card on the field
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCardView {
    pub card: CardView,
    /// Local zone and start slot on the owner's grid
    pub zone: u8,
    pub start: u8,
    /// Canonical position (home half at the bottom)
    pub field_zone: u8,
    pub field_column: u8,
    pub shot_markers: u8,
    pub unused_attack_icons: u8,
    pub attack_power: i32,
    pub defense_power: i32,
}

/// One side as shown to a renderer
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideView {
    pub side: Side,
    pub score: u8,
    pub field: Vec<FieldCardView>,
    pub hand: Vec<CardView>,
    pub bench: Vec<CardView>,
    pub synergy_hand: Vec<SynergyCard>,
    pub active_synergies: Vec<SynergyCard>,
    pub substitutions_left: u8,
}

/// The complete match view
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    pub phase: MatchPhase,
    pub turn_phase: TurnPhase,
    pub current_side: Side,
    pub turn: u32,
    pub turns_per_half: u32,
    pub control_position: i32,
    pub home: SideView,
    pub away: SideView,
    pub deck_count: u32,
    pub discard_count: u32,
    pub icons: IconReport,
    pub duel: Option<Duel>,
    pub pending_choice: Option<SynergyChoice>,
    pub shootout: Option<Shootout>,
    pub log: Vec<LogEntry>,
}

impl MatchView {
    pub fn from_state(state: &MatchState) -> Self {
        let icons = state.icon_report();
        Self {
            phase: state.phase,
            turn_phase: state.turn_phase,
            current_side: state.current_side,
            turn: state.turn,
            turns_per_half: state.config.turns_per_half,
            control_position: state.control_position,
            home: side_view(state, &icons, Side::Home),
            away: side_view(state, &icons, Side::Away),
            deck_count: state.synergy_deck.len() as u32,
            discard_count: state.discard.len() as u32,
            duel: state.duel.clone(),
            pending_choice: state.pending_choice.clone(),
            shootout: state.shootout.clone(),
            log: state.log.to_vec(),
            icons,
        }
    }
}

fn card_views(state: &MatchState, cards: &[CardId]) -> Vec<CardView> {
    cards
        .iter()
        .filter_map(|id| state.catalog.athlete(*id))
        .map(CardView::from)
        .collect()
}

fn side_view(state: &MatchState, icons: &IconReport, side: Side) -> SideView {
    let grid = state.field.grid(side);
    let team = state.side(side);

    let field = grid
        .placements()
        .into_iter()
        .filter_map(|p| {
            let athlete = state.catalog.athlete(p.card)?;
            Some(FieldCardView {
                card: CardView::from(athlete),
                zone: p.zone,
                start: p.start,
                field_zone: field_zone(side, p.zone),
                field_column: field_start(side, p.start),
                shot_markers: grid.shot_markers(p.card),
                unused_attack_icons: state.unused_attack_icons(side, p.card),
                attack_power: attack_power_with(state, icons, side, p.card),
                defense_power: defense_power_with(state, icons, side, p.card),
            })
        })
        .collect();

    SideView {
        side,
        score: team.score,
        field,
        hand: card_views(state, &team.hand),
        bench: card_views(state, &team.bench),
        synergy_hand: team.synergy_hand.clone(),
        active_synergies: team.active_synergies.clone(),
        substitutions_left: team.substitutions_left,
    }
}
