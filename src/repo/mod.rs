//! Repository adapters over an opaque storage backend.
//!
//! A repository owns the backend and is the single writer for every
//! collection; callers mutate a match in memory through the engine, then
//! hand the whole value back via [`Repository::upsert_match`]. Each
//! successful save publishes a [`StoreChange`] so stats/UI collaborators
//! know to reload and re-aggregate.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tokio::sync::broadcast;

use crate::{
    core::engine::{MatchDraft, MatchRecord},
    persist::{
        COLLECTION_FORMAT_VERSION, CollectionEnvelope, CollectionKind, PersistError,
        PersistResult, StorageBackend,
    },
    stats::{self, StatsSummary},
    team::Team,
    types::{MatchId, Sport, TeamId},
};

/// Change notification published after every successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreChange {
    /// Collection that was rewritten.
    pub kind: CollectionKind,
}

/// Persisted app settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Count in-progress matches in aggregated statistics.
    pub include_in_progress_stats: bool,
    /// Sport preselected when starting a new match.
    pub default_sport: Sport,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            include_in_progress_stats: false,
            default_sport: Sport::Other,
        }
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    format_version: u16,
    items: &'a [T],
}

/// Owns a storage backend and exposes typed collection access.
pub struct Repository {
    backend: Box<dyn StorageBackend>,
    changes_tx: broadcast::Sender<StoreChange>,
}

impl Repository {
    /// Creates a repository over `backend`.
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        let (changes_tx, _) = broadcast::channel(64);
        Self {
            backend,
            changes_tx,
        }
    }

    /// Subscribes to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes_tx.subscribe()
    }

    /// Loads all teams, deduplicated by id (first occurrence wins).
    pub fn load_teams(&self) -> PersistResult<Vec<Team>> {
        let teams: Vec<Team> = self.load_collection(CollectionKind::Teams)?;
        Ok(dedup_by_id(teams, |t| t.id))
    }

    /// Replaces the stored team collection.
    pub fn save_teams(&mut self, teams: &[Team]) -> PersistResult<()> {
        self.save_collection(CollectionKind::Teams, teams)
    }

    /// Loads all matches, deduplicated by id (first occurrence wins).
    pub fn load_matches(&self) -> PersistResult<Vec<MatchRecord>> {
        let matches: Vec<MatchRecord> = self.load_collection(CollectionKind::Matches)?;
        Ok(dedup_by_id(matches, |m| m.id))
    }

    /// Replaces the stored match collection.
    pub fn save_matches(&mut self, matches: &[MatchRecord]) -> PersistResult<()> {
        self.save_collection(CollectionKind::Matches, matches)
    }

    /// Loads settings, falling back to defaults when none are stored.
    pub fn load_settings(&self) -> PersistResult<Settings> {
        let mut items: Vec<Settings> = self.load_collection(CollectionKind::Settings)?;
        Ok(items.drain(..).next().unwrap_or_default())
    }

    /// Replaces the stored settings.
    pub fn save_settings(&mut self, settings: &Settings) -> PersistResult<()> {
        self.save_collection(CollectionKind::Settings, std::slice::from_ref(settings))
    }

    /// Creates and persists a new match, allocating the next free id.
    pub fn create_match(&mut self, draft: MatchDraft) -> PersistResult<MatchRecord> {
        let mut matches = self.load_matches()?;
        let id = matches.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        let record = MatchRecord::new(id, draft);
        matches.push(record.clone());
        self.save_matches(&matches)?;
        Ok(record)
    }

    /// Replaces the stored match with the same id, or appends it.
    ///
    /// Whole-value replace-by-id is the single-writer contract: the caller
    /// owns the match value between load and upsert.
    pub fn upsert_match(&mut self, record: MatchRecord) -> PersistResult<()> {
        let mut matches = self.load_matches()?;
        match matches.iter_mut().find(|m| m.id == record.id) {
            Some(slot) => *slot = record,
            None => matches.push(record),
        }
        self.save_matches(&matches)
    }

    /// Removes a match by id; returns whether anything was removed.
    pub fn remove_match(&mut self, id: MatchId) -> PersistResult<bool> {
        let mut matches = self.load_matches()?;
        let before = matches.len();
        matches.retain(|m| m.id != id);
        if matches.len() == before {
            return Ok(false);
        }
        self.save_matches(&matches)?;
        Ok(true)
    }

    /// Matches played in `sport`, in stored order.
    pub fn matches_for_sport(&self, sport: Sport) -> PersistResult<Vec<MatchRecord>> {
        let mut matches = self.load_matches()?;
        matches.retain(|m| m.sport == sport);
        Ok(matches)
    }

    /// Matches a team took part in, on either side.
    pub fn matches_for_team(&self, team_id: TeamId) -> PersistResult<Vec<MatchRecord>> {
        let mut matches = self.load_matches()?;
        matches.retain(|m| m.team_a.id == team_id || m.team_b.id == team_id);
        Ok(matches)
    }

    /// The `n` most recently created matches, newest first.
    pub fn recent_matches(&self, n: usize) -> PersistResult<Vec<MatchRecord>> {
        let mut matches = self.load_matches()?;
        matches.sort_by_key(|m| std::cmp::Reverse((m.created_at_ms, m.id)));
        matches.truncate(n);
        Ok(matches)
    }

    /// Teams affiliated with `sport`.
    pub fn teams_for_sport(&self, sport: Sport) -> PersistResult<Vec<Team>> {
        let mut teams = self.load_teams()?;
        teams.retain(|t| t.sport == sport);
        Ok(teams)
    }

    /// Recomputes aggregate statistics over the full stored history,
    /// honoring the persisted in-progress setting.
    pub fn build_stats(&self) -> PersistResult<StatsSummary> {
        let settings = self.load_settings()?;
        let matches = self.load_matches()?;
        Ok(stats::build(&matches, settings.include_in_progress_stats))
    }

    fn load_collection<T: DeserializeOwned>(&self, kind: CollectionKind) -> PersistResult<Vec<T>> {
        let Some(payload) = self.backend.load(kind)? else {
            return Ok(Vec::new());
        };
        let envelope: CollectionEnvelope<T> = serde_json::from_str(&payload)?;
        if envelope.format_version != COLLECTION_FORMAT_VERSION {
            return Err(PersistError::UnsupportedVersion(envelope.format_version));
        }
        Ok(envelope.items)
    }

    fn save_collection<T: Serialize>(
        &mut self,
        kind: CollectionKind,
        items: &[T],
    ) -> PersistResult<()> {
        let payload = serde_json::to_string(&EnvelopeRef {
            format_version: COLLECTION_FORMAT_VERSION,
            items,
        })?;
        self.backend.save(kind, &payload)?;
        let _ = self.changes_tx.send(StoreChange { kind });
        Ok(())
    }
}

fn dedup_by_id<T, K: Eq + std::hash::Hash>(items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    let mut seen = hashbrown::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key(item)))
        .collect()
}
