use std::cmp::Ordering;

use hashbrown::HashMap;

use crate::{
    core::engine::{MatchOutcome, MatchRecord},
    types::{ScoreMode, Sport, TeamId},
};

use super::summary::{SportOverview, StatsSummary, TeamRecord};

/// Mode-normalized view of one match used by the aggregation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Normalized {
    score_a: u32,
    score_b: u32,
    finished: bool,
    is_draw: bool,
}

fn normalize(m: &MatchRecord) -> Normalized {
    let (score_a, score_b) = m.score_pair();
    let outcome = m.outcome();
    Normalized {
        score_a,
        score_b,
        finished: outcome != MatchOutcome::InProgress,
        is_draw: outcome == MatchOutcome::Draw,
    }
}

#[derive(Debug, Default)]
struct SportAcc {
    match_count: u32,
    finished_count: u32,
    draw_count: u32,
    total_points: u64,
    mode_counts: HashMap<ScoreMode, u32>,
}

#[derive(Debug, Default)]
struct TeamAcc {
    name: String,
    games: u32,
    wins: u32,
    losses: u32,
    draws: u32,
    points_for: u32,
    points_against: u32,
    current_streak: i32,
    longest_win_streak: u32,
}

impl TeamAcc {
    fn feed(&mut self, scored: u32, conceded: u32, finished: bool, won: bool, drew: bool) {
        self.points_for += scored;
        self.points_against += conceded;
        if !finished {
            return;
        }
        self.games += 1;
        if drew {
            self.draws += 1;
            self.current_streak = 0;
        } else if won {
            self.wins += 1;
            self.current_streak = if self.current_streak > 0 {
                self.current_streak + 1
            } else {
                1
            };
            self.longest_win_streak = self.longest_win_streak.max(self.current_streak as u32);
        } else {
            self.losses += 1;
            self.current_streak = if self.current_streak < 0 {
                self.current_streak - 1
            } else {
                -1
            };
        }
    }
}

/// Folds a match history into per-team and per-sport summaries.
///
/// Pure and stateless: the same input always yields the same output, so
/// callers simply re-run it whenever the history changes. Matches without
/// a final result are skipped entirely unless `include_in_progress` is
/// set, in which case they contribute running totals but never
/// wins/losses/streaks.
pub fn build(matches: &[MatchRecord], include_in_progress: bool) -> StatsSummary {
    // Streaks are order-sensitive; ids break creation-time ties.
    let mut ordered: Vec<&MatchRecord> = matches.iter().collect();
    ordered.sort_by_key(|m| (m.created_at_ms, m.id));

    let mut sports: HashMap<Sport, SportAcc> = HashMap::new();
    let mut teams: HashMap<(TeamId, Sport), TeamAcc> = HashMap::new();

    for m in ordered {
        let norm = normalize(m);
        if !norm.finished && !include_in_progress {
            continue;
        }

        let sport_acc = sports.entry(m.sport).or_default();
        sport_acc.match_count += 1;
        if norm.finished {
            sport_acc.finished_count += 1;
        }
        if norm.is_draw {
            sport_acc.draw_count += 1;
        }
        sport_acc.total_points += u64::from(norm.score_a) + u64::from(norm.score_b);
        *sport_acc.mode_counts.entry(m.rules.mode()).or_default() += 1;

        let a_won = norm.finished && !norm.is_draw && norm.score_a > norm.score_b;
        let b_won = norm.finished && !norm.is_draw && norm.score_b > norm.score_a;

        let acc_a = teams.entry((m.team_a.id, m.sport)).or_default();
        acc_a.name = m.team_a.name.clone();
        acc_a.feed(norm.score_a, norm.score_b, norm.finished, a_won, norm.is_draw);

        let acc_b = teams.entry((m.team_b.id, m.sport)).or_default();
        acc_b.name = m.team_b.name.clone();
        acc_b.feed(norm.score_b, norm.score_a, norm.finished, b_won, norm.is_draw);
    }

    let mut team_records: Vec<TeamRecord> = teams
        .into_iter()
        .map(|((team_id, sport), acc)| {
            let games = f64::from(acc.games);
            let (win_rate, avg_for, avg_against) = if acc.games > 0 {
                (
                    f64::from(acc.wins) / games,
                    f64::from(acc.points_for) / games,
                    f64::from(acc.points_against) / games,
                )
            } else {
                (0.0, 0.0, 0.0)
            };
            TeamRecord {
                team_id,
                sport,
                name: acc.name,
                games: acc.games,
                wins: acc.wins,
                losses: acc.losses,
                draws: acc.draws,
                points_for: acc.points_for,
                points_against: acc.points_against,
                win_rate,
                avg_for,
                avg_against,
                avg_margin: avg_for - avg_against,
                current_streak: acc.current_streak,
                longest_win_streak: acc.longest_win_streak,
            }
        })
        .collect();
    team_records.sort_by(|x, y| leaderboard_order(x, y));

    let mut sport_overviews: Vec<SportOverview> = sports
        .into_iter()
        .map(|(sport, acc)| {
            let count = f64::from(acc.match_count.max(1));
            let mode_share = [ScoreMode::Points, ScoreMode::Sets, ScoreMode::Timed]
                .into_iter()
                .map(|mode| {
                    let n = acc.mode_counts.get(&mode).copied().unwrap_or(0);
                    (mode, f64::from(n) / count)
                })
                .collect();
            SportOverview {
                sport,
                match_count: acc.match_count,
                finished_count: acc.finished_count,
                draw_count: acc.draw_count,
                avg_total_points: acc.total_points as f64 / count,
                mode_share,
            }
        })
        .collect();
    sport_overviews.sort_by_key(|o| o.sport);

    StatsSummary {
        team_records,
        sport_overviews,
    }
}

/// Shared leaderboard tie-break: metric descending, then games played
/// descending, then name case-insensitively ascending.
fn leaderboard_order(x: &TeamRecord, y: &TeamRecord) -> Ordering {
    y.win_rate
        .partial_cmp(&x.win_rate)
        .unwrap_or(Ordering::Equal)
        .then_with(|| y.games.cmp(&x.games))
        .then_with(|| x.name.to_lowercase().cmp(&y.name.to_lowercase()))
}
