//! Status values returned by every engine mutation.
//!
//! Invalid UI-driven calls (scoring a finished match, ticking a points
//! match, undoing with an empty stack) must never crash the engine, so
//! guards reject by returning [`OpOutcome::Ignored`] and leaving the match
//! untouched. Callers that want the plain silent-no-op contract can drop
//! the value; tests assert on it.

use serde::{Deserialize, Serialize};

/// Why a guarded operation left the match untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    /// The match already has a final result.
    Finished,
    /// A zero score delta or zero tick has no effect.
    ZeroDelta,
    /// The operation does not apply to the match's scoring mode.
    WrongMode,
    /// The current period index is outside the period list.
    PeriodOutOfRange,
    /// Undo requested with an empty undo stack.
    NothingToUndo,
    /// Redo requested with an empty redo stack.
    NothingToRedo,
}

/// Result of one engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpOutcome {
    /// The operation mutated the match.
    Applied,
    /// A guard rejected the operation; the match is unchanged.
    Ignored(IgnoreReason),
}

impl OpOutcome {
    /// True when the operation took effect.
    pub fn applied(&self) -> bool {
        matches!(self, OpOutcome::Applied)
    }
}
