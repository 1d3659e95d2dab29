//! Mutable scoring state, shaped by the match's rule mode.

use serde::{Deserialize, Serialize};

use crate::{
    rules::RulesConfig,
    types::{ScoreMode, Side},
};

/// Per-set score arrays plus accumulated set wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetsScore {
    /// Zero-based index of the set currently being played.
    pub index: usize,
    /// Side A points per set; grows as sets progress.
    pub scores_a: Vec<u32>,
    /// Side B points per set; grows as sets progress.
    pub scores_b: Vec<u32>,
    /// Completed sets won by side A.
    pub sets_won_a: u32,
    /// Completed sets won by side B.
    pub sets_won_b: u32,
}

/// Clock-driven score with one remaining-time slot per period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedScore {
    /// Zero-based index of the period currently being played.
    pub current_period: usize,
    /// Remaining seconds per period; overtime appends slots.
    pub remaining_secs: Vec<u32>,
    /// Running score for side A.
    pub a: u32,
    /// Running score for side B.
    pub b: u32,
}

/// Scoring state for one match. Exactly one variant exists, and it always
/// matches the rules' mode; the shape invariant holds by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ScoreState {
    /// Race-to-target score pair.
    Points {
        /// Side A points.
        a: u32,
        /// Side B points.
        b: u32,
    },
    /// Best-of-sets score.
    Sets(SetsScore),
    /// Timed-periods score.
    Timed(TimedScore),
}

impl ScoreState {
    /// Builds the zeroed state matching the rules' mode.
    pub fn initial(rules: &RulesConfig) -> Self {
        match rules {
            RulesConfig::Points(_) => ScoreState::Points { a: 0, b: 0 },
            RulesConfig::Sets(_) => ScoreState::Sets(SetsScore {
                index: 0,
                scores_a: vec![0],
                scores_b: vec![0],
                sets_won_a: 0,
                sets_won_b: 0,
            }),
            RulesConfig::Timed(t) => ScoreState::Timed(TimedScore {
                current_period: 0,
                remaining_secs: vec![t.seconds_per_period; t.periods as usize],
                a: 0,
                b: 0,
            }),
        }
    }

    /// Mode this state is shaped for.
    pub fn mode(&self) -> ScoreMode {
        match self {
            ScoreState::Points { .. } => ScoreMode::Points,
            ScoreState::Sets(_) => ScoreMode::Sets,
            ScoreState::Timed(_) => ScoreMode::Timed,
        }
    }

    /// Headline score pair for the current scoring context: raw points,
    /// sets won, or the running timed score.
    pub fn headline(&self) -> (u32, u32) {
        match self {
            ScoreState::Points { a, b } => (*a, *b),
            ScoreState::Sets(s) => (s.sets_won_a, s.sets_won_b),
            ScoreState::Timed(t) => (t.a, t.b),
        }
    }
}

impl SetsScore {
    /// Points scored by `side` in the set currently being played.
    pub fn current_points(&self, side: Side) -> u32 {
        let scores = match side {
            Side::A => &self.scores_a,
            Side::B => &self.scores_b,
        };
        scores.get(self.index).copied().unwrap_or(0)
    }
}
