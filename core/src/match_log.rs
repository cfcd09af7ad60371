//! Match log
//!
//! Human-readable event descriptions handed to the presentation layer. The
//! log is a ring buffer: once full, the oldest entry is evicted. Sequence
//! numbers keep increasing so collaborators can tell what they have seen.

use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;
use parity_scale_codec::{Decode, Encode};
use scale_info::TypeInfo;
use serde::{Deserialize, Serialize};

use crate::types::Side;

/// Category of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogKind {
    KickOff,
    Placement,
    TeamAction,
    Effect,
    Synergy,
    Shot,
    Duel,
    Goal,
    Substitution,
    TurnEnd,
    HalfTime,
    FullTime,
    Penalty,
}

/// A single event description
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode, TypeInfo, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub seq: u64,
    pub turn: u32,
    pub side: Option<Side>,
    pub kind: LogKind,
    pub message: String,
}

/// Bounded, append-only event log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_seq: u64,
}

impl MatchLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, turn: u32, side: Option<Side>, kind: LogKind, message: String) {
        crate::log::debug("match_log", &message);
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry {
            seq: self.next_seq,
            turn,
            side,
            kind,
            message,
        });
        self.next_seq += 1;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total entries ever appended, including evicted ones.
    pub fn total_appended(&self) -> u64 {
        self.next_seq
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Entries appended after `seq`, oldest first.
    pub fn since(&self, seq: u64) -> Vec<LogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.seq > seq)
            .cloned()
            .collect()
    }

    pub fn to_vec(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn test_oldest_entries_are_evicted() {
        let mut log = MatchLog::new(3);
        for i in 0..5 {
            log.push(1, None, LogKind::Placement, format!("entry {}", i));
        }
        assert_eq!(log.len(), 3);
        let messages: Vec<_> = log.iter().map(|e| e.message.clone()).collect();
        assert_eq!(messages, vec!["entry 2", "entry 3", "entry 4"]);
        assert_eq!(log.total_appended(), 5);
    }

    #[test]
    fn test_since_returns_newer_entries() {
        let mut log = MatchLog::new(10);
        for i in 0..4 {
            log.push(i, Some(Side::Home), LogKind::TurnEnd, format!("turn {}", i));
        }
        let newer = log.since(1);
        assert_eq!(newer.len(), 2);
        assert_eq!(newer[0].seq, 2);
    }
}
