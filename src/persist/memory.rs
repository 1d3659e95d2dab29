//! Hash-map backend for tests and previews.

use hashbrown::HashMap;

use super::{CollectionKind, PersistResult, StorageBackend};

/// Volatile in-memory [`StorageBackend`].
#[derive(Debug, Default)]
pub struct MemoryBackend {
    payloads: HashMap<CollectionKind, String>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, kind: CollectionKind) -> PersistResult<Option<String>> {
        Ok(self.payloads.get(&kind).cloned())
    }

    fn save(&mut self, kind: CollectionKind, payload: &str) -> PersistResult<()> {
        self.payloads.insert(kind, payload.to_string());
        Ok(())
    }
}
