//! Append-only match event log entries.

use serde::{Deserialize, Serialize};

use crate::types::{EventId, Millis, Side};

/// Kind of a logged match event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Points added to a side.
    Score,
    /// Points removed from a side.
    Unscore,
    /// A side won the current set.
    SetWin,
    /// A period started.
    PeriodStart,
    /// A period ended.
    PeriodEnd,
    /// The match finished with a winner.
    MatchEnd,
    /// Free-form annotation.
    Note,
}

/// One immutable entry in a match's event log.
///
/// The log is only ever appended to, truncated by undo, or cleared by a
/// full reset; entries are never edited or reordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    /// Monotonic per-match event identifier.
    pub id: EventId,
    /// Wall-clock timestamp in milliseconds.
    pub ts_ms: Millis,
    /// Event kind.
    pub kind: EventKind,
    /// Side the event concerns, when applicable.
    pub side: Option<Side>,
    /// Numeric payload (score delta, set index, period index).
    pub value: Option<i64>,
    /// Text payload for notes and overrides.
    pub text: Option<String>,
}

impl MatchEvent {
    /// Builds an event with empty optional payloads.
    pub fn new(id: EventId, ts_ms: Millis, kind: EventKind) -> Self {
        Self {
            id,
            ts_ms,
            kind,
            side: None,
            value: None,
            text: None,
        }
    }

    /// Returns a copy tagged with `side`.
    pub fn for_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    /// Returns a copy carrying a numeric payload.
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    /// Returns a copy carrying a text payload.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}
