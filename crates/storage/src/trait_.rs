//! Storage trait abstractions.

use async_trait::async_trait;
use shadow_ranch_core::{ProgressState, UserProfile};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Key cannot be mapped onto the medium
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Durable key-value snapshots of track progress.
///
/// Calls are synchronous; a backend may still defer the physical write.
pub trait SnapshotStore {
    /// Persist `state` under `key`, replacing any previous snapshot.
    fn save(&mut self, key: &str, state: &ProgressState) -> Result<()>;

    /// Load the snapshot stored under `key`.
    ///
    /// A missing or undecodable snapshot is `Ok(None)`. `Err` is reserved for
    /// a medium that cannot be read at all, and callers treat it as absent
    /// too.
    fn load(&self, key: &str) -> Result<Option<ProgressState>>;
}

/// Decode a stored snapshot, treating a corrupt payload as absent.
pub(crate) fn decode_snapshot(key: &str, payload: &str) -> Option<ProgressState> {
    match serde_json::from_str(payload) {
        Ok(state) => Some(state),
        Err(e) => {
            tracing::warn!(key, error = %e, "discarding undecodable progress snapshot");
            None
        }
    }
}

/// Storage for learner profiles keyed by wallet public key.
#[async_trait]
pub trait ProfileStorage: Send + Sync {
    /// Save a profile (create or update).
    async fn save_profile(&mut self, profile: &UserProfile) -> Result<()>;

    /// Load a profile by public key.
    async fn load_profile(&self, public_key: &str) -> Result<Option<UserProfile>>;

    /// List all stored profiles.
    async fn list_profiles(&self) -> Result<Vec<UserProfile>>;

    /// Delete a profile.
    async fn delete_profile(&mut self, public_key: &str) -> Result<()>;
}

/// Reject keys that would escape the storage directory or are empty.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}
