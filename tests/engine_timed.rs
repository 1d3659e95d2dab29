use matchlog::{
    core::{
        engine::{MatchDraft, MatchOutcome, MatchRecord},
        outcome::{IgnoreReason, OpOutcome},
    },
    event::EventKind,
    rules::{RulesConfig, TimedRules},
    score::ScoreState,
    team::Team,
    types::{Side, Sport},
};

fn timed_match(rules: TimedRules) -> MatchRecord {
    MatchRecord::new(
        1,
        MatchDraft {
            sport: Sport::Football,
            rules: RulesConfig::Timed(rules),
            team_a: Team::new(1, "Rovers", Sport::Football, 0),
            team_b: Team::new(2, "United", Sport::Football, 0),
        },
    )
}

fn football() -> TimedRules {
    TimedRules {
        periods: 2,
        seconds_per_period: 45 * 60,
        allow_draw: true,
        overtime_seconds: None,
        stop_on_score: false,
    }
}

fn timed_state(m: &MatchRecord) -> &matchlog::score::TimedScore {
    match &m.score {
        ScoreState::Timed(t) => t,
        other => panic!("expected timed state, got {other:?}"),
    }
}

#[test]
fn tied_final_whistle_with_draws_allowed_is_a_finished_draw() {
    let mut m = timed_match(football());
    let _ = m.score(Side::A, 1);
    let _ = m.score(Side::B, 1);

    assert!(m.tick(45 * 60).applied());
    assert!(!m.is_finished());
    assert_eq!(timed_state(&m).current_period, 1);

    assert!(m.tick(45 * 60).applied());
    // Drawn: finished purely by derivation, winner stays None.
    assert!(m.is_finished());
    assert_eq!(m.winner, None);
    assert_eq!(m.outcome(), MatchOutcome::Draw);

    let period_ends = m.events.iter().filter(|e| e.kind == EventKind::PeriodEnd).count();
    let period_starts = m.events.iter().filter(|e| e.kind == EventKind::PeriodStart).count();
    let match_ends = m.events.iter().filter(|e| e.kind == EventKind::MatchEnd).count();
    assert_eq!(period_ends, 2);
    assert_eq!(period_starts, 1);
    assert_eq!(match_ends, 0);

    // A drawn match rejects further scoring like any finished match.
    assert_eq!(
        m.score(Side::A, 1),
        OpOutcome::Ignored(IgnoreReason::Finished)
    );
    assert_eq!(m.tick(10), OpOutcome::Ignored(IgnoreReason::Finished));
}

#[test]
fn draw_state_differs_from_in_progress_tie() {
    let mut m = timed_match(football());
    let _ = m.tick(45 * 60);
    // Tied score, clock still running in the second half.
    assert_eq!(m.outcome(), MatchOutcome::InProgress);

    let _ = m.tick(45 * 60);
    assert_eq!(m.outcome(), MatchOutcome::Draw);
}

#[test]
fn leading_side_wins_at_final_exhaustion() {
    let mut m = timed_match(football());
    let _ = m.score(Side::B, 2);
    let _ = m.tick(45 * 60);
    let _ = m.tick(45 * 60);

    assert_eq!(m.winner, Some(Side::B));
    assert_eq!(m.outcome(), MatchOutcome::Won(Side::B));
    let ends: Vec<_> = m
        .events
        .iter()
        .filter(|e| e.kind == EventKind::MatchEnd)
        .collect();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].side, Some(Side::B));
}

#[test]
fn tied_score_without_draws_appends_overtime() {
    let mut m = timed_match(TimedRules {
        periods: 3,
        seconds_per_period: 20 * 60,
        allow_draw: false,
        overtime_seconds: Some(5 * 60),
        stop_on_score: false,
    });
    for _ in 0..3 {
        let _ = m.tick(20 * 60);
    }

    // Regulation over and level: an overtime slot appears, no winner yet.
    assert!(!m.is_finished());
    let t = timed_state(&m);
    assert_eq!(t.remaining_secs.len(), 4);
    assert_eq!(t.remaining_secs[3], 5 * 60);
    assert_eq!(t.current_period, 3);

    // Still level after overtime: another slot, indefinitely.
    let _ = m.tick(5 * 60);
    assert_eq!(timed_state(&m).remaining_secs.len(), 5);

    let _ = m.score(Side::A, 1);
    let _ = m.tick(5 * 60);
    assert_eq!(m.winner, Some(Side::A));
}

#[test]
fn overtime_length_defaults_and_floors() {
    let mut m = timed_match(TimedRules {
        periods: 1,
        seconds_per_period: 60,
        allow_draw: false,
        overtime_seconds: None,
        stop_on_score: false,
    });
    let _ = m.tick(60);
    assert_eq!(timed_state(&m).remaining_secs[1], 60);

    let mut m = timed_match(TimedRules {
        periods: 1,
        seconds_per_period: 60,
        allow_draw: false,
        overtime_seconds: Some(10),
        stop_on_score: false,
    });
    let _ = m.tick(60);
    assert_eq!(timed_state(&m).remaining_secs[1], 30);
}

#[test]
fn end_period_forces_the_whistle_early() {
    let mut m = timed_match(football());
    let _ = m.score(Side::A, 3);
    assert!(m.end_period().applied());

    let t = timed_state(&m);
    assert_eq!(t.current_period, 1);
    assert_eq!(t.remaining_secs[0], 0);

    assert!(m.end_period().applied());
    assert_eq!(m.winner, Some(Side::A));
    assert_eq!(
        m.end_period(),
        OpOutcome::Ignored(IgnoreReason::Finished)
    );
}

#[test]
fn tick_clamps_at_zero_within_a_period() {
    let mut m = timed_match(football());
    let _ = m.tick(45 * 60 + 500);
    // Over-ticking exhausts the period but never goes negative.
    let t = timed_state(&m);
    assert_eq!(t.remaining_secs[0], 0);
    assert_eq!(t.current_period, 1);
    assert_eq!(t.remaining_secs[1], 45 * 60);
}

#[test]
fn score_never_ends_a_timed_match_by_itself() {
    let mut m = timed_match(football());
    let _ = m.score(Side::A, 99);
    assert!(!m.is_finished());
    assert_eq!(m.score_pair(), (99, 0));
}
