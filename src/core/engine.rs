use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::{
    event::{EventKind, MatchEvent},
    rules::{RulesConfig, SetsRules},
    score::{ScoreState, SetsScore, TimedScore},
    team::Team,
    types::{EventId, MatchId, Millis, ScoreMode, Side, Sport},
};

use super::outcome::{IgnoreReason, OpOutcome};

/// Maximum retained undo (and therefore redo) snapshots per match.
pub const UNDO_LIMIT: usize = 100;

/// Final state of a match as derived from its score and rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Still being played.
    InProgress,
    /// Won by a side.
    Won(Side),
    /// Finished level; only timed matches with draws allowed end here.
    Draw,
}

/// Immutable value snapshot of everything undo/redo restores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSnapshot {
    /// Scoring state at capture time.
    pub score: ScoreState,
    /// Winner at capture time.
    pub winner: Option<Side>,
    /// Full event log at capture time.
    pub events: Vec<MatchEvent>,
    /// Next event id at capture time.
    pub next_event_id: EventId,
    /// Last-updated timestamp at capture time.
    pub updated_at_ms: Millis,
}

/// Payload used to create a new [`MatchRecord`]; ids come from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchDraft {
    /// Sport being played.
    pub sport: Sport,
    /// Rules; validated on construction.
    pub rules: RulesConfig,
    /// Side A team snapshot.
    pub team_a: Team,
    /// Side B team snapshot.
    pub team_b: Team,
}

/// Aggregate root of a single contest.
///
/// Sport, rules, and the two team snapshots are fixed for the match's
/// lifetime; scoring state mutates exclusively through the operations
/// below. Every mutation captures a snapshot first, so any run of
/// operations can be stepped back exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Stable match identifier.
    pub id: MatchId,
    /// Creation timestamp in milliseconds.
    pub created_at_ms: Millis,
    /// Last-mutation timestamp in milliseconds.
    pub updated_at_ms: Millis,
    /// Sport being played.
    pub sport: Sport,
    /// Validated rules, fixed at creation.
    pub rules: RulesConfig,
    /// Side A team snapshot.
    pub team_a: Team,
    /// Side B team snapshot.
    pub team_b: Team,
    /// Current scoring state; shape always matches `rules.mode()`.
    pub score: ScoreState,
    /// Winning side, `None` while in progress and for drawn matches.
    pub winner: Option<Side>,
    /// Append-only event log.
    pub events: Vec<MatchEvent>,
    next_event_id: EventId,
    undo: Vec<EngineSnapshot>,
    redo: Vec<EngineSnapshot>,
}

impl MatchRecord {
    /// Builds a fresh match from a draft, validating its rules.
    pub fn new(id: MatchId, draft: MatchDraft) -> Self {
        let rules = draft.rules.validated();
        let now = now_ms();
        Self {
            id,
            created_at_ms: now,
            updated_at_ms: now,
            sport: draft.sport,
            rules,
            team_a: draft.team_a,
            team_b: draft.team_b,
            score: ScoreState::initial(&rules),
            winner: None,
            events: Vec::new(),
            next_event_id: 1,
            undo: Vec::new(),
            redo: Vec::new(),
        }
    }

    /// Adds `delta` to `side`'s score in the current scoring context.
    ///
    /// Points mode evaluates the race win condition afterwards; sets mode
    /// settles the current set; timed mode only adjusts the running score.
    pub fn score(&mut self, side: Side, delta: i32) -> OpOutcome {
        if delta == 0 {
            return OpOutcome::Ignored(IgnoreReason::ZeroDelta);
        }
        if self.is_finished() {
            return OpOutcome::Ignored(IgnoreReason::Finished);
        }
        self.remember();

        let kind = if delta > 0 {
            EventKind::Score
        } else {
            EventKind::Unscore
        };
        let ev = self.new_event(kind).for_side(side).with_value(delta.into());
        self.events.push(ev);

        match self.rules {
            RulesConfig::Points(r) => {
                if let ScoreState::Points { a, b } = &mut self.score {
                    let cell = match side {
                        Side::A => a,
                        Side::B => b,
                    };
                    *cell = add_delta(*cell, delta);
                }
                let (a, b) = self.score.headline();
                if let Some(w) = race_winner(r.target, r.win_by_two, a, b) {
                    self.declare_winner(w);
                }
            }
            RulesConfig::Sets(r) => {
                if let ScoreState::Sets(s) = &mut self.score {
                    let idx = s.index;
                    let column = match side {
                        Side::A => &mut s.scores_a,
                        Side::B => &mut s.scores_b,
                    };
                    if let Some(cell) = column.get_mut(idx) {
                        *cell = add_delta(*cell, delta);
                    }
                }
                self.settle_set(r);
            }
            RulesConfig::Timed(_) => {
                if let ScoreState::Timed(t) = &mut self.score {
                    let cell = match side {
                        Side::A => &mut t.a,
                        Side::B => &mut t.b,
                    };
                    *cell = add_delta(*cell, delta);
                }
            }
        }

        self.touch();
        OpOutcome::Applied
    }

    /// Advances the clock of a timed match by `seconds` of logical time.
    ///
    /// Reaching zero runs the period-end logic, which may advance the
    /// period, finish the match, or append an overtime slot.
    pub fn tick(&mut self, seconds: u32) -> OpOutcome {
        if self.score.mode() != ScoreMode::Timed {
            return OpOutcome::Ignored(IgnoreReason::WrongMode);
        }
        if seconds == 0 {
            return OpOutcome::Ignored(IgnoreReason::ZeroDelta);
        }
        if self.is_finished() {
            return OpOutcome::Ignored(IgnoreReason::Finished);
        }
        if !self.period_in_bounds() {
            return OpOutcome::Ignored(IgnoreReason::PeriodOutOfRange);
        }
        self.remember();

        let exhausted = if let ScoreState::Timed(t) = &mut self.score {
            let cur = t.current_period;
            t.remaining_secs[cur] = t.remaining_secs[cur].saturating_sub(seconds);
            t.remaining_secs[cur] == 0
        } else {
            false
        };
        if exhausted {
            self.finish_period();
        }

        self.touch();
        OpOutcome::Applied
    }

    /// Forces the current period to end regardless of remaining time.
    pub fn end_period(&mut self) -> OpOutcome {
        if self.score.mode() != ScoreMode::Timed {
            return OpOutcome::Ignored(IgnoreReason::WrongMode);
        }
        if self.is_finished() {
            return OpOutcome::Ignored(IgnoreReason::Finished);
        }
        if !self.period_in_bounds() {
            return OpOutcome::Ignored(IgnoreReason::PeriodOutOfRange);
        }
        self.remember();

        if let ScoreState::Timed(t) = &mut self.score {
            let cur = t.current_period;
            t.remaining_secs[cur] = 0;
        }
        self.finish_period();

        self.touch();
        OpOutcome::Applied
    }

    /// Zeroes both scores of the set currently being played.
    ///
    /// Completed sets and set-win counts are untouched.
    pub fn reset_current_set(&mut self) -> OpOutcome {
        if self.score.mode() != ScoreMode::Sets {
            return OpOutcome::Ignored(IgnoreReason::WrongMode);
        }
        if self.is_finished() {
            return OpOutcome::Ignored(IgnoreReason::Finished);
        }
        self.remember();

        if let ScoreState::Sets(s) = &mut self.score {
            let idx = s.index;
            if let Some(cell) = s.scores_a.get_mut(idx) {
                *cell = 0;
            }
            if let Some(cell) = s.scores_b.get_mut(idx) {
                *cell = 0;
            }
        }

        self.touch();
        OpOutcome::Applied
    }

    /// Overrides the current scoring context with absolute values.
    ///
    /// Points mode re-evaluates the win condition; sets and timed
    /// overrides never complete a set or period by themselves. The
    /// override is logged as a note.
    pub fn set_score(&mut self, a: u32, b: u32) -> OpOutcome {
        if self.is_finished() {
            return OpOutcome::Ignored(IgnoreReason::Finished);
        }
        self.remember();

        let ev = self
            .new_event(EventKind::Note)
            .with_text(format!("score set to {a}:{b}"));
        self.events.push(ev);

        match self.rules {
            RulesConfig::Points(r) => {
                if let ScoreState::Points { a: sa, b: sb } = &mut self.score {
                    *sa = a;
                    *sb = b;
                }
                if let Some(w) = race_winner(r.target, r.win_by_two, a, b) {
                    self.declare_winner(w);
                }
            }
            RulesConfig::Sets(_) => {
                if let ScoreState::Sets(s) = &mut self.score {
                    let idx = s.index;
                    if let Some(cell) = s.scores_a.get_mut(idx) {
                        *cell = a;
                    }
                    if let Some(cell) = s.scores_b.get_mut(idx) {
                        *cell = b;
                    }
                }
            }
            RulesConfig::Timed(_) => {
                if let ScoreState::Timed(t) = &mut self.score {
                    t.a = a;
                    t.b = b;
                }
            }
        }

        self.touch();
        OpOutcome::Applied
    }

    /// Appends a free-form note. Allowed even on finished matches.
    pub fn add_note(&mut self, text: impl Into<String>) -> OpOutcome {
        self.remember();
        let ev = self.new_event(EventKind::Note).with_text(text.into());
        self.events.push(ev);
        self.touch();
        OpOutcome::Applied
    }

    /// Reinitializes scoring state, clears the winner and the whole event
    /// log. The one operation exempt from the finished guard; undoable.
    pub fn reset_all(&mut self) -> OpOutcome {
        self.remember();
        self.score = ScoreState::initial(&self.rules);
        self.winner = None;
        self.events.clear();
        self.touch();
        OpOutcome::Applied
    }

    /// Steps back to the most recent snapshot. No-op on an empty stack.
    pub fn undo(&mut self) -> OpOutcome {
        let Some(snap) = self.undo.pop() else {
            return OpOutcome::Ignored(IgnoreReason::NothingToUndo);
        };
        let current = self.capture();
        self.redo.push(current);
        self.restore(snap);
        OpOutcome::Applied
    }

    /// Steps forward to the most recently undone state. No-op on an empty
    /// stack.
    pub fn redo(&mut self) -> OpOutcome {
        let Some(snap) = self.redo.pop() else {
            return OpOutcome::Ignored(IgnoreReason::NothingToRedo);
        };
        let current = self.capture();
        self.undo.push(current);
        self.restore(snap);
        OpOutcome::Applied
    }

    /// Builds a brand-new match with the same sport, rules, and teams,
    /// optionally swapping sides. The source match is untouched.
    pub fn rematch(&self, new_id: MatchId, swap_sides: bool) -> MatchRecord {
        let (team_a, team_b) = if swap_sides {
            (self.team_b.clone(), self.team_a.clone())
        } else {
            (self.team_a.clone(), self.team_b.clone())
        };
        MatchRecord::new(
            new_id,
            MatchDraft {
                sport: self.sport,
                rules: self.rules,
                team_a,
                team_b,
            },
        )
    }

    /// True once the match has a final result.
    ///
    /// A timed match with draws allowed ends without a winner when its
    /// last period slot is exhausted with the score level; that state is
    /// derived here rather than stored.
    pub fn is_finished(&self) -> bool {
        if self.winner.is_some() {
            return true;
        }
        match (&self.score, &self.rules) {
            (ScoreState::Timed(t), RulesConfig::Timed(r)) if r.allow_draw => {
                t.current_period + 1 == t.remaining_secs.len()
                    && t.remaining_secs[t.current_period] == 0
                    && t.a == t.b
            }
            _ => false,
        }
    }

    /// Final outcome derived from winner and scoring state.
    pub fn outcome(&self) -> MatchOutcome {
        match self.winner {
            Some(side) => MatchOutcome::Won(side),
            None if self.is_finished() => MatchOutcome::Draw,
            None => MatchOutcome::InProgress,
        }
    }

    /// Headline score pair: raw points, sets won, or the timed score.
    pub fn score_pair(&self) -> (u32, u32) {
        self.score.headline()
    }

    /// One-line progress description for UI callers.
    pub fn summary(&self) -> String {
        let (a, b) = self.score_pair();
        let head = format!(
            "{} {a}:{b} {}",
            self.team_a.short_name, self.team_b.short_name
        );
        match (&self.score, self.outcome()) {
            (_, MatchOutcome::Won(side)) => {
                let name = match side {
                    Side::A => &self.team_a.name,
                    Side::B => &self.team_b.name,
                };
                format!("{head} (final, {name} win)")
            }
            (_, MatchOutcome::Draw) => format!("{head} (draw)"),
            (ScoreState::Points { .. }, _) => head,
            (ScoreState::Sets(s), _) => {
                let pa = s.current_points(Side::A);
                let pb = s.current_points(Side::B);
                format!("{head} (set {}, {pa}:{pb})", s.index + 1)
            }
            (ScoreState::Timed(t), _) => {
                let left = t
                    .remaining_secs
                    .get(t.current_period)
                    .copied()
                    .unwrap_or(0);
                format!(
                    "{head} (period {}, {} left)",
                    t.current_period + 1,
                    fmt_clock(left)
                )
            }
        }
    }

    /// Snapshots currently held on the undo stack.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Snapshots currently held on the redo stack.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }

    fn period_in_bounds(&self) -> bool {
        matches!(&self.score, ScoreState::Timed(t) if t.current_period < t.remaining_secs.len())
    }

    /// Period-end bookkeeping shared by `tick` and `end_period`.
    fn finish_period(&mut self) {
        let RulesConfig::Timed(rules) = self.rules else {
            return;
        };
        let Some((ending, slots, a, b)) = (match &self.score {
            ScoreState::Timed(t) => Some((t.current_period, t.remaining_secs.len(), t.a, t.b)),
            _ => None,
        }) else {
            return;
        };

        let ev = self
            .new_event(EventKind::PeriodEnd)
            .with_value(ending as i64);
        self.events.push(ev);

        if ending + 1 < slots {
            if let ScoreState::Timed(t) = &mut self.score {
                t.current_period += 1;
            }
            let ev = self
                .new_event(EventKind::PeriodStart)
                .with_value((ending + 1) as i64);
            self.events.push(ev);
            return;
        }

        if a != b {
            let winner = if a > b { Side::A } else { Side::B };
            self.declare_winner(winner);
            return;
        }

        if rules.allow_draw {
            // Drawn and finished; derived from state, nothing to log.
            return;
        }

        let overtime = rules.overtime_seconds.unwrap_or(60).max(30);
        if let ScoreState::Timed(t) = &mut self.score {
            t.remaining_secs.push(overtime);
            t.current_period += 1;
        }
        let ev = self
            .new_event(EventKind::PeriodStart)
            .with_value((ending + 1) as i64);
        self.events.push(ev);
    }

    fn settle_set(&mut self, rules: SetsRules) {
        let decided = match &self.score {
            ScoreState::Sets(s) => race_winner(
                rules.points_per_set,
                rules.win_by_two,
                s.current_points(Side::A),
                s.current_points(Side::B),
            )
            .map(|side| (side, s.index)),
            _ => None,
        };
        let Some((side, ending_index)) = decided else {
            return;
        };

        if let ScoreState::Sets(s) = &mut self.score {
            match side {
                Side::A => s.sets_won_a += 1,
                Side::B => s.sets_won_b += 1,
            }
        }
        let ev = self
            .new_event(EventKind::SetWin)
            .for_side(side)
            .with_value(ending_index as i64);
        self.events.push(ev);

        let won = match &self.score {
            ScoreState::Sets(s) => match side {
                Side::A => s.sets_won_a,
                Side::B => s.sets_won_b,
            },
            _ => 0,
        };
        if won >= rules.sets_to_win {
            self.declare_winner(side);
        } else if let ScoreState::Sets(s) = &mut self.score {
            s.scores_a.push(0);
            s.scores_b.push(0);
            s.index += 1;
        }
    }

    fn declare_winner(&mut self, side: Side) {
        self.winner = Some(side);
        let ev = self.new_event(EventKind::MatchEnd).for_side(side);
        self.events.push(ev);
    }

    fn new_event(&mut self, kind: EventKind) -> MatchEvent {
        let id = self.next_event_id;
        self.next_event_id += 1;
        MatchEvent::new(id, now_ms(), kind)
    }

    fn capture(&self) -> EngineSnapshot {
        EngineSnapshot {
            score: self.score.clone(),
            winner: self.winner,
            events: self.events.clone(),
            next_event_id: self.next_event_id,
            updated_at_ms: self.updated_at_ms,
        }
    }

    fn restore(&mut self, snap: EngineSnapshot) {
        self.score = snap.score;
        self.winner = snap.winner;
        self.events = snap.events;
        self.next_event_id = snap.next_event_id;
        self.updated_at_ms = snap.updated_at_ms;
    }

    /// Captures the pre-mutation snapshot and invalidates redo history.
    fn remember(&mut self) {
        if self.undo.len() == UNDO_LIMIT {
            self.undo.remove(0);
        }
        self.undo.push(self.capture());
        self.redo.clear();
    }

    fn touch(&mut self) {
        self.updated_at_ms = now_ms();
    }
}

/// Race win condition shared by points mode and individual sets.
fn race_winner(target: u32, win_by_two: bool, a: u32, b: u32) -> Option<Side> {
    let (hi, lo, side) = if a > b {
        (a, b, Side::A)
    } else if b > a {
        (b, a, Side::B)
    } else {
        return None;
    };
    if hi >= target && (!win_by_two || hi - lo >= 2) {
        Some(side)
    } else {
        None
    }
}

fn add_delta(current: u32, delta: i32) -> u32 {
    if delta >= 0 {
        current.saturating_add(delta as u32)
    } else {
        current.saturating_sub(delta.unsigned_abs())
    }
}

fn fmt_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
