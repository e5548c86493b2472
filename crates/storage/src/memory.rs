//! In-memory snapshot store.
//!
//! Used in tests and as the degraded medium when no durable storage is
//! available; contents vanish with the process.

use std::collections::HashMap;
use shadow_ranch_core::ProgressState;
use super::trait_::decode_snapshot;
use super::{SnapshotStore, StorageError, Result};

/// HashMap-backed snapshot store.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    entries: HashMap<String, String>,
    read_only: bool,
}

impl MemorySnapshotStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every write, mimicking a full or locked medium.
    pub fn read_only() -> Self {
        Self {
            entries: HashMap::new(),
            read_only: true,
        }
    }

    /// Put raw payload under `key`, bypassing serialization.
    pub fn insert_raw(&mut self, key: impl Into<String>, payload: impl Into<String>) {
        self.entries.insert(key.into(), payload.into());
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn save(&mut self, key: &str, state: &ProgressState) -> Result<()> {
        if self.read_only {
            return Err(StorageError::Other("storage is read-only".to_string()));
        }
        let json = serde_json::to_string(state)?;
        self.entries.insert(key.to_string(), json);
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<ProgressState>> {
        match self.entries.get(key) {
            Some(json) => Ok(decode_snapshot(key, json)),
            None => Ok(None),
        }
    }
}
