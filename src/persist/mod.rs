//! Storage abstraction for named record collections.
//!
//! The engine and aggregator never touch storage; repositories hand whole
//! collections to an opaque backend as JSON payloads keyed by
//! [`CollectionKind`]. Backends are dumb byte stores; migration beyond a
//! format-version check is out of scope here.

/// In-memory backend.
pub mod memory;
/// SQLite-backed backend.
pub mod sqlite;

use serde::{Deserialize, Serialize};

/// Version number for serialized [`CollectionEnvelope`] payloads.
pub const COLLECTION_FORMAT_VERSION: u16 = 1;

/// Logical collection names used for storage and change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    /// Team snapshots.
    Teams,
    /// Match records.
    Matches,
    /// App settings.
    Settings,
}

impl CollectionKind {
    /// Stable storage key for this collection.
    pub fn as_str(self) -> &'static str {
        match self {
            CollectionKind::Teams => "teams",
            CollectionKind::Matches => "matches",
            CollectionKind::Settings => "settings",
        }
    }
}

/// Versioned wrapper for stable on-disk payload decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionEnvelope<T> {
    /// Payload format version.
    pub format_version: u16,
    /// Wrapped items.
    pub items: Vec<T>,
}

impl<T> CollectionEnvelope<T> {
    /// Constructs an envelope using [`COLLECTION_FORMAT_VERSION`].
    pub fn new(items: Vec<T>) -> Self {
        Self {
            format_version: COLLECTION_FORMAT_VERSION,
            items,
        }
    }
}

/// Persistence failure.
#[derive(Debug)]
pub enum PersistError {
    /// Underlying SQLite failure.
    Sqlite(rusqlite::Error),
    /// JSON encode/decode failure.
    Serde(serde_json::Error),
    /// Payload carries a format version this build does not understand.
    UnsupportedVersion(u16),
    /// Anything else.
    Message(String),
}

impl std::fmt::Display for PersistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistError::Sqlite(e) => write!(f, "sqlite error: {e}"),
            PersistError::Serde(e) => write!(f, "serialization error: {e}"),
            PersistError::UnsupportedVersion(v) => {
                write!(f, "unsupported collection format version {v}")
            }
            PersistError::Message(msg) => f.write_str(msg),
        }
    }
}

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Sqlite(e) => Some(e),
            PersistError::Serde(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serde(value)
    }
}

/// Result alias for persistence calls.
pub type PersistResult<T> = Result<T, PersistError>;

/// Object-safe backend storing one JSON payload per collection.
pub trait StorageBackend: Send {
    /// Loads the payload last saved for `kind`, if any.
    fn load(&self, kind: CollectionKind) -> PersistResult<Option<String>>;
    /// Replaces the payload stored for `kind`.
    fn save(&mut self, kind: CollectionKind, payload: &str) -> PersistResult<()>;
}
