use tempfile::TempDir;

use matchlog::{
    core::engine::{MatchDraft, MatchRecord},
    persist::{CollectionKind, PersistError, StorageBackend, sqlite::SqliteBackend},
    repo::Repository,
    rules::RulesConfig,
    team::Team,
    types::{Side, Sport},
};

fn draft(sport: Sport, a: &Team, b: &Team) -> MatchDraft {
    MatchDraft {
        sport,
        rules: RulesConfig::default_for(sport),
        team_a: a.clone(),
        team_b: b.clone(),
    }
}

#[test]
fn collections_round_trip_through_sqlite() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("matchlog.db");

    let alpha = Team::new(1, "Alpha", Sport::Esport, 1);
    let bravo = Team::new(2, "Bravo", Sport::Esport, 2);

    let saved_match;
    {
        let backend = SqliteBackend::open(&db_path).expect("open sqlite");
        let mut repo = Repository::new(Box::new(backend));

        repo.save_teams(&[alpha.clone(), bravo.clone()]).expect("save teams");

        let record = repo
            .create_match(draft(Sport::Esport, &alpha, &bravo))
            .expect("create");
        let mut live = record;
        for _ in 0..13 {
            let _ = live.score(Side::A, 1);
        }
        repo.upsert_match(live.clone()).expect("upsert");
        saved_match = live;
    }

    let backend = SqliteBackend::open(&db_path).expect("reopen");
    let repo = Repository::new(Box::new(backend));

    let teams = repo.load_teams().expect("load teams");
    assert_eq!(teams, vec![alpha, bravo]);

    let matches = repo.load_matches().expect("load matches");
    assert_eq!(matches, vec![saved_match]);
    assert_eq!(matches[0].winner, Some(Side::A));
    // Undo history survives the round trip.
    assert!(matches[0].undo_len() > 0);
}

#[test]
fn loads_deduplicate_by_id_keeping_the_first() {
    let tmp = TempDir::new().expect("tmp");
    let db_path = tmp.path().join("dupes.db");

    let first = Team::new(7, "First", Sport::Football, 1);
    let shadow = first.with_name("Shadow");

    let backend = SqliteBackend::open(&db_path).expect("open sqlite");
    let mut repo = Repository::new(Box::new(backend));
    repo.save_teams(&[first.clone(), shadow]).expect("save");

    let teams = repo.load_teams().expect("load");
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].name, "First");
}

#[test]
fn unknown_format_versions_are_refused() {
    let mut backend = SqliteBackend::open_in_memory().expect("open");
    backend
        .save(
            CollectionKind::Teams,
            r#"{"format_version":99,"items":[]}"#,
        )
        .expect("raw save");

    let repo = Repository::new(Box::new(backend));
    match repo.load_teams() {
        Err(PersistError::UnsupportedVersion(99)) => {}
        other => panic!("expected version refusal, got {other:?}"),
    }
}

#[test]
fn missing_collections_load_as_empty() {
    let backend = SqliteBackend::open_in_memory().expect("open");
    let repo = Repository::new(Box::new(backend));
    assert!(repo.load_teams().expect("teams").is_empty());
    assert!(repo.load_matches().expect("matches").is_empty());
    assert_eq!(
        repo.load_settings().expect("settings"),
        matchlog::repo::Settings::default()
    );
}
