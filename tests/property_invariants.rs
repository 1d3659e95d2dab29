use proptest::prelude::*;

use matchlog::{
    core::engine::{MatchDraft, MatchRecord},
    rules::{PointsRules, RulesConfig, SetsRules, TimedRules},
    team::Team,
    types::{Side, Sport},
};

#[derive(Debug, Clone)]
enum Action {
    Score { side_a: bool, delta: i8 },
    Tick { seconds: u16 },
    EndPeriod,
    SetScore { a: u8, b: u8 },
    Note,
    ResetCurrentSet,
    ResetAll,
    Undo,
    Redo,
}

fn rules_strategy() -> impl Strategy<Value = RulesConfig> {
    prop_oneof![
        (1u32..40, any::<bool>()).prop_map(|(target, win_by_two)| {
            RulesConfig::Points(PointsRules { target, win_by_two })
        }),
        (1u32..4, 1u32..15, any::<bool>()).prop_map(|(sets_to_win, points_per_set, win_by_two)| {
            RulesConfig::Sets(SetsRules {
                sets_to_win,
                points_per_set,
                win_by_two,
            })
        }),
        (1u32..4, 1u32..300, any::<bool>(), prop::option::of(1u32..300)).prop_map(
            |(periods, seconds_per_period, allow_draw, overtime_seconds)| {
                RulesConfig::Timed(TimedRules {
                    periods,
                    seconds_per_period,
                    allow_draw,
                    overtime_seconds,
                    stop_on_score: false,
                })
            }
        ),
    ]
}

fn mutation_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (any::<bool>(), -4i8..6).prop_map(|(side_a, delta)| Action::Score { side_a, delta }),
        (1u16..400).prop_map(|seconds| Action::Tick { seconds }),
        Just(Action::EndPeriod),
        (0u8..30, 0u8..30).prop_map(|(a, b)| Action::SetScore { a, b }),
        Just(Action::Note),
        Just(Action::ResetCurrentSet),
        Just(Action::ResetAll),
    ]
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        5 => mutation_strategy(),
        1 => Just(Action::Undo),
        1 => Just(Action::Redo),
    ]
}

fn fresh_match(rules: RulesConfig) -> MatchRecord {
    MatchRecord::new(
        1,
        MatchDraft {
            sport: Sport::Other,
            rules,
            team_a: Team::new(1, "Alpha", Sport::Other, 0),
            team_b: Team::new(2, "Bravo", Sport::Other, 0),
        },
    )
}

fn apply(m: &mut MatchRecord, action: &Action) {
    match *action {
        Action::Score { side_a, delta } => {
            let side = if side_a { Side::A } else { Side::B };
            let _ = m.score(side, delta.into());
        }
        Action::Tick { seconds } => {
            let _ = m.tick(seconds.into());
        }
        Action::EndPeriod => {
            let _ = m.end_period();
        }
        Action::SetScore { a, b } => {
            let _ = m.set_score(a.into(), b.into());
        }
        Action::Note => {
            let _ = m.add_note("checkpoint");
        }
        Action::ResetCurrentSet => {
            let _ = m.reset_current_set();
        }
        Action::ResetAll => {
            let _ = m.reset_all();
        }
        Action::Undo => {
            let _ = m.undo();
        }
        Action::Redo => {
            let _ = m.redo();
        }
    }
}

proptest! {
    #[test]
    fn validated_is_idempotent(rules in rules_strategy()) {
        let once = rules.validated();
        prop_assert_eq!(once.validated(), once);
    }

    #[test]
    fn undo_all_redo_all_round_trips(
        rules in rules_strategy(),
        actions in prop::collection::vec(mutation_strategy(), 1..80),
    ) {
        let mut m = fresh_match(rules);
        let initial = (m.score.clone(), m.winner, m.events.clone());

        for action in &actions {
            apply(&mut m, action);
        }
        let final_state = (m.score.clone(), m.winner, m.events.clone());

        while m.undo().applied() {}
        prop_assert_eq!(&(m.score.clone(), m.winner, m.events.clone()), &initial);

        while m.redo().applied() {}
        prop_assert_eq!(&(m.score.clone(), m.winner, m.events.clone()), &final_state);
    }

    #[test]
    fn random_sequences_preserve_structural_invariants(
        rules in rules_strategy(),
        actions in prop::collection::vec(action_strategy(), 1..200),
    ) {
        let mut m = fresh_match(rules);

        for action in &actions {
            apply(&mut m, action);

            // Scoring shape always matches the rules' mode.
            prop_assert_eq!(m.score.mode(), m.rules.mode());

            // A declared winner means the match reads as finished.
            if m.winner.is_some() {
                prop_assert!(m.is_finished());
            }

            // Event ids are strictly increasing within the log.
            for pair in m.events.windows(2) {
                prop_assert!(pair[0].id < pair[1].id);
            }

            match &m.score {
                matchlog::score::ScoreState::Sets(s) => {
                    prop_assert_eq!(s.scores_a.len(), s.scores_b.len());
                    prop_assert!(s.index < s.scores_a.len());
                }
                matchlog::score::ScoreState::Timed(t) => {
                    prop_assert!(t.current_period < t.remaining_secs.len());
                }
                matchlog::score::ScoreState::Points { .. } => {}
            }
        }

        // A finished match ignores every scoring path.
        if m.is_finished() {
            let before = (m.score.clone(), m.winner);
            let _ = m.score(Side::A, 1);
            let _ = m.tick(30);
            let _ = m.end_period();
            let _ = m.reset_current_set();
            prop_assert_eq!((m.score.clone(), m.winner), before);
        }
    }
}
