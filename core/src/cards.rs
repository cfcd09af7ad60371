//! Card catalog
//!
//! The standard athletes, synergy deck and squads are compiled from the JSON
//! files in /cards by build.rs. Tests and hosts may also assemble their own
//! catalog from hand-built cards.

use serde::{Deserialize, Serialize};

include!(concat!(env!("OUT_DIR"), "/catalog_generated.rs"));

/// Immutable card definitions shared by every snapshot of a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    /// Sorted by id
    athletes: Vec<AthleteCard>,
    /// Deck order before shuffling
    synergies: Vec<SynergyCard>,
}

impl Catalog {
    pub fn new(mut athletes: Vec<AthleteCard>, synergies: Vec<SynergyCard>) -> Self {
        athletes.sort_by_key(|card| card.id);
        athletes.dedup_by_key(|card| card.id);
        Self {
            athletes,
            synergies,
        }
    }

    /// The catalog built from the bundled card files.
    pub fn standard() -> Self {
        Self::new(get_all_athletes(), get_synergy_deck())
    }

    pub fn athlete(&self, id: CardId) -> Option<&AthleteCard> {
        self.athletes
            .binary_search_by_key(&id, |card| card.id)
            .ok()
            .map(|index| &self.athletes[index])
    }

    pub fn athletes(&self) -> &[AthleteCard] {
        &self.athletes
    }

    pub fn synergies(&self) -> &[SynergyCard] {
        &self.synergies
    }
}
