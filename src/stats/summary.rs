//! Derived statistics records.
//!
//! Everything here is regenerated wholesale by [`crate::stats::build`] and
//! is never a source of truth; persisting it is pointless because it is
//! fully derivable from the match history.

use serde::{Deserialize, Serialize};

use crate::types::{ScoreMode, Sport, TeamId};

/// Aggregate record for one team within one sport.
///
/// A team playing several sports gets one record per sport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    /// Team identifier.
    pub team_id: TeamId,
    /// Sport this record covers.
    pub sport: Sport,
    /// Display name at aggregation time.
    pub name: String,
    /// Finished matches counted.
    pub games: u32,
    /// Finished matches won.
    pub wins: u32,
    /// Finished matches lost.
    pub losses: u32,
    /// Finished matches drawn.
    pub draws: u32,
    /// Points scored across all counted matches, in-progress included.
    pub points_for: u32,
    /// Points conceded across all counted matches, in-progress included.
    pub points_against: u32,
    /// `wins / games`, 0 when no finished games.
    pub win_rate: f64,
    /// Average points scored per finished game.
    pub avg_for: f64,
    /// Average points conceded per finished game.
    pub avg_against: f64,
    /// `avg_for - avg_against`.
    pub avg_margin: f64,
    /// Signed run of consecutive wins (+) or losses (-); a draw resets to 0.
    pub current_streak: i32,
    /// Longest win streak observed.
    pub longest_win_streak: u32,
}

/// Aggregate record for one sport across the whole history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SportOverview {
    /// Sport this overview covers.
    pub sport: Sport,
    /// Matches counted (in-progress included when requested).
    pub match_count: u32,
    /// Matches with a final result.
    pub finished_count: u32,
    /// Matches finished level.
    pub draw_count: u32,
    /// Average combined score per counted match.
    pub avg_total_points: f64,
    /// Share of counted matches per scoring mode, each in `0.0..=1.0`.
    pub mode_share: Vec<(ScoreMode, f64)>,
}

/// Result of one aggregation pass over the match history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct StatsSummary {
    /// Per team-and-sport records, leaderboard ordered: win rate
    /// descending, then games descending, then name case-insensitively.
    pub team_records: Vec<TeamRecord>,
    /// Per-sport overviews, ordered by sport.
    pub sport_overviews: Vec<SportOverview>,
}
