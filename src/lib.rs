//! Live match scoring with undo/redo, derived statistics, and local
//! collection persistence.
//!
//! # Examples
//!
//! Scoring a race-to-13 match with [`core::engine::MatchRecord`]:
//! ```
//! use matchlog::{
//!     core::engine::{MatchDraft, MatchRecord},
//!     rules::RulesConfig,
//!     team::Team,
//!     types::{Side, Sport},
//! };
//!
//! let draft = MatchDraft {
//!     sport: Sport::Esport,
//!     rules: RulesConfig::default_for(Sport::Esport),
//!     team_a: Team::new(1, "Alpha", Sport::Esport, 0),
//!     team_b: Team::new(2, "Bravo", Sport::Esport, 0),
//! };
//! let mut m = MatchRecord::new(1, draft);
//! for _ in 0..13 {
//!     let _ = m.score(Side::A, 1);
//! }
//! assert_eq!(m.winner, Some(Side::A));
//! assert!(m.undo().applied());
//! assert_eq!(m.winner, None);
//! ```
//!
//! Repository usage with an in-memory backend:
//! ```
//! use matchlog::{
//!     core::engine::MatchDraft,
//!     persist::memory::MemoryBackend,
//!     repo::Repository,
//!     rules::RulesConfig,
//!     team::Team,
//!     types::{Side, Sport},
//! };
//!
//! let mut repo = Repository::new(Box::new(MemoryBackend::new()));
//! let record = repo
//!     .create_match(MatchDraft {
//!         sport: Sport::Volleyball,
//!         rules: RulesConfig::default_for(Sport::Volleyball),
//!         team_a: Team::new(1, "Setters", Sport::Volleyball, 0),
//!         team_b: Team::new(2, "Blockers", Sport::Volleyball, 0),
//!     })
//!     .expect("create");
//!
//! let mut live = record.clone();
//! let _ = live.score(Side::A, 1);
//! repo.upsert_match(live).expect("upsert");
//!
//! let summary = repo.build_stats().expect("stats");
//! assert_eq!(summary.sport_overviews.len(), 0); // in-progress excluded by default
//! ```
#![deny(missing_docs)]

/// Match aggregate and the scoring state machine.
pub mod core;
/// Append-only match event log entries.
pub mod event;
/// Storage abstraction and backends.
pub mod persist;
/// Repositories over the storage backend.
pub mod repo;
/// Rule configuration and per-sport presets.
pub mod rules;
/// Scoring state shapes.
pub mod score;
/// History aggregation into team/sport summaries.
pub mod stats;
/// Team and player snapshot records.
pub mod team;
/// Shared primitive types and enums.
pub mod types;
