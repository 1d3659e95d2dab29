//! Match rule configuration and per-sport presets.

use serde::{Deserialize, Serialize};

use crate::types::{ScoreMode, Sport};

/// Upper clamp for point targets and per-set points.
pub const MAX_TARGET: u32 = 999;
/// Upper clamp for sets needed to win.
pub const MAX_SETS_TO_WIN: u32 = 9;
/// Upper clamp for the number of regulation periods.
pub const MAX_PERIODS: u32 = 12;
/// Upper clamp for period and overtime length (4 hours).
pub const MAX_PERIOD_SECONDS: u32 = 4 * 3600;

/// Race-to-target rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsRules {
    /// Points needed to win.
    pub target: u32,
    /// Winner must also lead by at least two.
    pub win_by_two: bool,
}

/// Best-of-sets rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetsRules {
    /// Sets needed to win the match (best of `2 * sets_to_win - 1`).
    pub sets_to_win: u32,
    /// Points needed to win a single set.
    pub points_per_set: u32,
    /// Set winner must lead by at least two.
    pub win_by_two: bool,
}

/// Timed-periods rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedRules {
    /// Number of regulation periods.
    pub periods: u32,
    /// Length of each regulation period in seconds.
    pub seconds_per_period: u32,
    /// A tied final score ends the match as a draw.
    pub allow_draw: bool,
    /// Overtime period length; `None` falls back to 60 seconds.
    pub overtime_seconds: Option<u32>,
    /// Clock is expected to stop while a score is being entered.
    pub stop_on_score: bool,
}

/// How a match is won. Exactly one variant is live, keyed by mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RulesConfig {
    /// First to a point target.
    Points(PointsRules),
    /// Best-of-N sets.
    Sets(SetsRules),
    /// Fixed periods against the clock.
    Timed(TimedRules),
}

impl RulesConfig {
    /// Mode selected by this configuration.
    pub fn mode(&self) -> ScoreMode {
        match self {
            RulesConfig::Points(_) => ScoreMode::Points,
            RulesConfig::Sets(_) => ScoreMode::Sets,
            RulesConfig::Timed(_) => ScoreMode::Timed,
        }
    }

    /// Clamps every numeric field into sane bounds. Idempotent.
    pub fn validated(self) -> Self {
        match self {
            RulesConfig::Points(r) => RulesConfig::Points(PointsRules {
                target: r.target.clamp(1, MAX_TARGET),
                win_by_two: r.win_by_two,
            }),
            RulesConfig::Sets(r) => RulesConfig::Sets(SetsRules {
                sets_to_win: r.sets_to_win.clamp(1, MAX_SETS_TO_WIN),
                points_per_set: r.points_per_set.clamp(1, MAX_TARGET),
                win_by_two: r.win_by_two,
            }),
            RulesConfig::Timed(r) => RulesConfig::Timed(TimedRules {
                periods: r.periods.clamp(1, MAX_PERIODS),
                seconds_per_period: r.seconds_per_period.clamp(1, MAX_PERIOD_SECONDS),
                allow_draw: r.allow_draw,
                overtime_seconds: r.overtime_seconds.map(|s| s.clamp(1, MAX_PERIOD_SECONDS)),
                stop_on_score: r.stop_on_score,
            }),
        }
    }

    /// Default preset for `sport`. Total and deterministic.
    pub fn default_for(sport: Sport) -> Self {
        let config = match sport {
            Sport::Volleyball => RulesConfig::Sets(SetsRules {
                sets_to_win: 2,
                points_per_set: 25,
                win_by_two: true,
            }),
            Sport::TableTennis => RulesConfig::Sets(SetsRules {
                sets_to_win: 3,
                points_per_set: 11,
                win_by_two: true,
            }),
            Sport::Badminton => RulesConfig::Sets(SetsRules {
                sets_to_win: 2,
                points_per_set: 21,
                win_by_two: true,
            }),
            Sport::Football => RulesConfig::Timed(TimedRules {
                periods: 2,
                seconds_per_period: 45 * 60,
                allow_draw: true,
                overtime_seconds: None,
                stop_on_score: false,
            }),
            Sport::Handball => RulesConfig::Timed(TimedRules {
                periods: 2,
                seconds_per_period: 30 * 60,
                allow_draw: true,
                overtime_seconds: None,
                stop_on_score: false,
            }),
            Sport::Basketball => RulesConfig::Timed(TimedRules {
                periods: 4,
                seconds_per_period: 10 * 60,
                allow_draw: false,
                overtime_seconds: Some(5 * 60),
                stop_on_score: true,
            }),
            Sport::IceHockey => RulesConfig::Timed(TimedRules {
                periods: 3,
                seconds_per_period: 20 * 60,
                allow_draw: false,
                overtime_seconds: Some(5 * 60),
                stop_on_score: false,
            }),
            Sport::Esport => RulesConfig::Points(PointsRules {
                target: 13,
                win_by_two: false,
            }),
            Sport::Other => RulesConfig::Points(PointsRules {
                target: 21,
                win_by_two: false,
            }),
        };
        config.validated()
    }

    /// Switches to points mode with the given target. Always succeeds.
    pub fn with_points(self, target: u32, win_by_two: bool) -> Self {
        RulesConfig::Points(PointsRules { target, win_by_two }).validated()
    }

    /// Switches to sets mode with the given shape. Always succeeds.
    pub fn with_sets(self, sets_to_win: u32, points_per_set: u32, win_by_two: bool) -> Self {
        RulesConfig::Sets(SetsRules {
            sets_to_win,
            points_per_set,
            win_by_two,
        })
        .validated()
    }

    /// Switches to timed mode with the given shape. Always succeeds.
    pub fn with_time(self, periods: u32, seconds_per_period: u32, allow_draw: bool) -> Self {
        let overtime_seconds = match self {
            RulesConfig::Timed(t) => t.overtime_seconds,
            _ => None,
        };
        RulesConfig::Timed(TimedRules {
            periods,
            seconds_per_period,
            allow_draw,
            overtime_seconds,
            stop_on_score: false,
        })
        .validated()
    }
}
