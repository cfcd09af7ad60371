//! Match state
//!
//! `MatchState` is the snapshot every operation reads and produces. Rule
//! handlers work on a clone and hand it back only when the intent succeeds,
//! so a rejected intent never leaves a half-applied snapshot behind.

use alloc::collections::BTreeMap;
use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::cards::Catalog;
use crate::config::{MatchConfig, CONTROL_CENTER, CONTROL_MAX};
use crate::duel::{Duel, DuelPhase};
use crate::error::{GameError, GameResult};
use crate::field::Field;
use crate::icons::{self, IconReport};
use crate::match_log::{LogKind, MatchLog};
use crate::penalties::Shootout;
use crate::phase::{MatchPhase, TurnPhase};
use crate::rng::shuffled_deck;
use crate::types::{AthleteCard, CardId, IconKind, Side, Squad, SynergyCard};

/// Everything one team holds
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SideState {
    /// Athletes waiting to be placed
    pub hand: Vec<CardId>,
    /// Substitutes
    pub bench: Vec<CardId>,
    pub synergy_hand: Vec<SynergyCard>,
    /// Synergies played into the current (or next) duel
    pub active_synergies: Vec<SynergyCard>,
    /// Attack-icon indices each fielded card has shot with this half
    pub used_shot_icons: BTreeMap<CardId, Vec<u8>>,
    pub score: u8,
    pub substitutions_left: u8,
}

impl SideState {
    fn from_squad(squad: &Squad, substitutions: u8) -> Self {
        Self {
            hand: squad.starters.clone(),
            bench: squad.bench.clone(),
            substitutions_left: substitutions,
            ..Self::default()
        }
    }

    pub fn used_icons(&self, card: CardId) -> &[u8] {
        self.used_shot_icons
            .get(&card)
            .map(|used| used.as_slice())
            .unwrap_or(&[])
    }
}

/// Per-turn counters and one-turn grants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnState {
    pub placements_made: u8,
    pub shots_taken: u8,
    /// Card allowed one shot outside the shot budget
    pub bonus_shot: Option<CardId>,
    /// Card whose next shot faces no defender
    pub ignore_defense: Option<CardId>,
}

/// Synergy cards revealed by an effect, waiting for the owner to keep one
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynergyChoice {
    pub side: Side,
    pub options: Vec<SynergyCard>,
}

/// The complete match snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    pub phase: MatchPhase,
    pub turn_phase: TurnPhase,
    /// Side on the ball
    pub current_side: Side,
    /// Turn number within the current half (1-indexed, 0 before kick-off)
    pub turn: u32,
    /// 0 = away dominates, 100 = home dominates
    pub control_position: i32,
    pub field: Field,
    pub home: SideState,
    pub away: SideState,
    /// Face-down synergy deck, top card first
    pub synergy_deck: Vec<SynergyCard>,
    pub discard: Vec<SynergyCard>,
    pub turn_state: TurnState,
    pub duel: Option<Duel>,
    pub pending_choice: Option<SynergyChoice>,
    pub shootout: Option<Shootout>,
    pub log: MatchLog,
    pub catalog: Arc<Catalog>,
    pub config: Arc<MatchConfig>,
    pub seed: u64,
}

impl MatchState {
    /// Set up a match waiting for kick-off.
    ///
    /// Every squad card must exist in the catalog and appear only once across
    /// both squads.
    pub fn new(
        catalog: Arc<Catalog>,
        config: MatchConfig,
        home: Squad,
        away: Squad,
        seed: u64,
    ) -> GameResult<Self> {
        let mut seen = BTreeSet::new();
        for squad in [&home, &away] {
            for card in squad.starters.iter().chain(squad.bench.iter()) {
                if catalog.athlete(*card).is_none() {
                    return Err(GameError::UnknownCard { card: *card });
                }
                if !seen.insert(*card) {
                    return Err(GameError::DuplicateCard { card: *card });
                }
            }
        }

        let synergy_deck = shuffled_deck(catalog.synergies(), seed);
        crate::log::info(&format!(
            "new match: seed={} deck={} home={} away={}",
            seed,
            synergy_deck.len(),
            home.starters.len(),
            away.starters.len()
        ));

        Ok(Self {
            phase: MatchPhase::Draft,
            turn_phase: TurnPhase::Start,
            current_side: Side::Home,
            turn: 0,
            control_position: CONTROL_CENTER,
            field: Field::default(),
            home: SideState::from_squad(&home, config.substitutions_per_match),
            away: SideState::from_squad(&away, config.substitutions_per_match),
            synergy_deck,
            discard: Vec::new(),
            turn_state: TurnState::default(),
            duel: None,
            pending_choice: None,
            shootout: None,
            log: MatchLog::new(config.log_capacity),
            catalog,
            config: Arc::new(config),
            seed,
        })
    }

    /// A match with the bundled catalog, squads and default rules.
    pub fn standard(seed: u64) -> GameResult<Self> {
        let (home, away) = crate::cards::get_standard_squads();
        Self::new(
            Arc::new(Catalog::standard()),
            MatchConfig::default(),
            home,
            away,
            seed,
        )
    }

    pub fn side(&self, side: Side) -> &SideState {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn side_mut(&mut self, side: Side) -> &mut SideState {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    /// The very first turn of the match.
    pub fn is_first_turn(&self) -> bool {
        self.phase == MatchPhase::FirstHalf && self.turn == 1
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_over()
    }

    /// Side expected to submit the next intent, `None` once the match is over.
    pub fn acting_side(&self) -> Option<Side> {
        match self.phase {
            MatchPhase::FullTime => None,
            MatchPhase::Penalty => self.shootout.as_ref().map(|s| s.next_side()),
            _ => {
                if let Some(choice) = &self.pending_choice {
                    return Some(choice.side);
                }
                match &self.duel {
                    Some(duel) if duel.phase == DuelPhase::DefenderSynergySelection => {
                        Some(duel.defending_side())
                    }
                    _ => Some(self.current_side),
                }
            }
        }
    }

    pub fn athlete(&self, card: CardId) -> GameResult<&AthleteCard> {
        self.catalog
            .athlete(card)
            .ok_or(GameError::UnknownCard { card })
    }

    /// Complete icons on the current field.
    pub fn icon_report(&self) -> IconReport {
        icons::scan(&self.field, &self.catalog, &self.config)
    }

    pub fn score(&self) -> (u8, u8) {
        (self.home.score, self.away.score)
    }

    /// Attack half-icons `card` has not shot with this half.
    pub fn unused_attack_icons(&self, side: Side, card: CardId) -> u8 {
        let total = self
            .catalog
            .athlete(card)
            .map(|athlete| athlete.attack_icon_count())
            .unwrap_or(0);
        total.saturating_sub(self.side(side).used_icons(card).len()) as u8
    }

    /// Lowest attack-icon index of `card` still available this half.
    pub fn next_unused_attack_index(&self, side: Side, card: CardId) -> Option<u8> {
        let total = self.catalog.athlete(card)?.attack_icon_count() as u8;
        let used = self.side(side).used_icons(card);
        (0..total).find(|index| !used.contains(index))
    }

    /// Draw up to `count` synergies for `side`, limited by the deck and the
    /// hand limit. Returns how many were drawn.
    pub fn draw_synergies(&mut self, side: Side, count: usize) -> usize {
        let room = (self.config.synergy_hand_limit as usize)
            .saturating_sub(self.side(side).synergy_hand.len());
        let n = count.min(room).min(self.synergy_deck.len());
        let drawn: Vec<SynergyCard> = self.synergy_deck.drain(..n).collect();
        self.side_mut(side).synergy_hand.extend(drawn);
        n
    }

    /// Move control `amount` points toward `side`, clamped to the field.
    pub fn shift_control(&mut self, side: Side, amount: i32) {
        let target = self.control_position + amount * side.control_direction();
        self.control_position = target.clamp(0, CONTROL_MAX);
    }

    /// Settle the start of the current side's turn.
    pub fn begin_turn(&mut self) {
        self.turn_state = TurnState::default();
        self.turn_phase = TurnPhase::Start;
        let counts = *self.icon_report().for_side(self.current_side);
        let team_icons = counts.get(IconKind::Pass) + counts.get(IconKind::Press);
        self.turn_phase = TurnPhase::after_start(self.is_first_turn(), team_icons);
        self.log_summary();
    }

    /// Fresh half: every attack icon is available again.
    pub fn reset_shot_icons(&mut self) {
        for side in Side::ALL {
            self.side_mut(side).used_shot_icons.clear();
            self.field.grid_mut(side).clear_shot_markers();
        }
    }

    pub fn push_log(&mut self, side: Option<Side>, kind: LogKind, message: String) {
        self.log.push(self.turn, side, kind, message);
    }

    pub fn log_summary(&self) {
        crate::log::state_summary(
            &format!("{}", self.phase),
            self.turn,
            &format!("{}", self.current_side),
            &format!("{}", self.turn_phase),
            self.control_position,
            self.home.score,
            self.away.score,
        );
    }
}
