//! Shared primitive IDs and match-related enums.

use serde::{Deserialize, Serialize};

/// Stable match identifier.
pub type MatchId = u64;
/// Stable team identifier.
pub type TeamId = u64;
/// Stable player identifier.
pub type PlayerId = u64;
/// Monotonic per-match event identifier.
pub type EventId = u64;
/// Milliseconds since the Unix epoch.
pub type Millis = u64;

/// One of the two match participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Side A (home / left).
    A,
    /// Side B (away / right).
    B,
}

impl Side {
    /// Returns the opposing side.
    pub fn opposite(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// Scoring discipline selecting the win-condition algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMode {
    /// Race to a fixed point target.
    Points,
    /// Best-of-N sets, each played to a point target.
    Sets,
    /// Fixed periods of play against the clock.
    Timed,
}

/// Supported sports with built-in rule presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    /// Indoor volleyball.
    Volleyball,
    /// Basketball.
    Basketball,
    /// Association football.
    Football,
    /// Team handball.
    Handball,
    /// Ice hockey.
    IceHockey,
    /// Table tennis.
    TableTennis,
    /// Badminton.
    Badminton,
    /// Counter-Strike style esport (race to 13 rounds).
    Esport,
    /// Anything without a dedicated preset.
    Other,
}

impl Sport {
    /// Human-readable sport name.
    pub fn label(self) -> &'static str {
        match self {
            Sport::Volleyball => "Volleyball",
            Sport::Basketball => "Basketball",
            Sport::Football => "Football",
            Sport::Handball => "Handball",
            Sport::IceHockey => "Ice Hockey",
            Sport::TableTennis => "Table Tennis",
            Sport::Badminton => "Badminton",
            Sport::Esport => "Esport",
            Sport::Other => "Other",
        }
    }
}
