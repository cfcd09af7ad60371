//! Logging utilities
//!
//! Thin wrappers over the `log` facade so rule modules log with one call and a
//! consistent target. The host decides whether anything is printed.

#![allow(unused)]

const TARGET: &str = "touchline";

/// Log an info message
#[inline(always)]
pub fn info(msg: &str) {
    ::log::info!(target: TARGET, "{}", msg);
}

/// Log a warning message
#[inline(always)]
pub fn warn(msg: &str) {
    ::log::warn!(target: TARGET, "{}", msg);
}

/// Log a debug message with a label
#[inline(always)]
pub fn debug(label: &str, msg: &str) {
    ::log::debug!(target: TARGET, "[{}] {}", label, msg);
}

/// Log match state summary
#[inline(always)]
pub fn state_summary(
    phase: &str,
    turn: u32,
    side: &str,
    turn_phase: &str,
    control: i32,
    home_score: u8,
    away_score: u8,
) {
    ::log::debug!(
        target: TARGET,
        "phase={} turn={} side={} turn_phase={} control={} score={}-{}",
        phase,
        turn,
        side,
        turn_phase,
        control,
        home_score,
        away_score
    );
}

/// Log an action being performed
#[inline(always)]
pub fn action(name: &str, details: &str) {
    ::log::debug!(target: TARGET, ">> {} ({})", name, details);
}

/// Log action result
#[inline(always)]
pub fn result(success: bool, msg: &str) {
    if success {
        ::log::debug!(target: TARGET, "<< ok: {}", msg);
    } else {
        ::log::info!(target: TARGET, "<< rejected: {}", msg);
    }
}
