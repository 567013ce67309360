//! The battle log: an ordered record of everything a match did.

use serde::{Deserialize, Serialize};

/// Category of a log entry, used by frontends for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogKind {
    /// A side committing to a move (includes the roll).
    Action,
    /// Damage, healing, dodges, stuns landing.
    Effect,
    /// Rejected actions, stun skips, reset notices.
    System,
    /// Match over.
    Outcome,
}

/// A single line of the battle log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub message: String,
    pub kind: LogKind,
}

/// Append-only battle log.
///
/// Frontends either read the whole thing or call [`BattleLog::drain_new`]
/// each frame to pick up entries appended since the last call. Reset is the
/// only operation that clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleLog {
    entries: Vec<LogEntry>,
    #[serde(skip)]
    cursor: usize,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: impl Into<String>, kind: LogKind) {
        self.entries.push(LogEntry {
            message: message.into(),
            kind,
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries appended since the last drain.
    pub fn drain_new(&mut self) -> &[LogEntry] {
        let start = self.cursor;
        self.cursor = self.entries.len();
        &self.entries[start..]
    }

    /// The most recent `count` entries.
    pub fn recent(&self, count: usize) -> &[LogEntry] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}
