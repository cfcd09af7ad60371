//! Touchline rule engine
//!
//! Turn-based two-sided card battles on a soccer pitch. The crate is
//! `no_std` + `alloc` capable; the default `std` feature only adds
//! `std::error::Error` and the std backends of the serialization crates.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod actions;
pub mod ai;
pub mod cards;
pub mod config;
pub mod duel;
pub mod effects;
pub mod engine;
pub mod error;
pub mod field;
pub mod icons;
pub mod log;
pub mod match_log;
pub mod penalties;
pub mod phase;
pub mod placement;
pub mod rng;
pub mod state;
pub mod types;
pub mod view;

#[cfg(test)]
mod tests;

pub use actions::TeamAction;
pub use ai::choose_intent;
pub use cards::Catalog;
pub use config::MatchConfig;
pub use duel::{attack_power, defense_power, Duel, DuelOutcome, DuelPhase};
pub use engine::{apply_intent, Intent, MatchEngine};
pub use error::{GameError, GameResult};
pub use field::{Field, Grid, Placement};
pub use icons::{CompleteIcon, IconReport, MatchFamily};
pub use match_log::{LogEntry, LogKind, MatchLog};
pub use phase::{IntentKind, MatchPhase, TurnPhase};
pub use placement::validate_placement;
pub use state::{MatchState, SideState, TurnState};
pub use types::*;
pub use view::MatchView;
