//! JSON file storage implementations.
//!
//! Progress snapshots live in `<root>/progress/<key>.json` and profiles in
//! `<root>/profiles/<public key>.json`. Writes go through a temporary file
//! and a rename so a crash never leaves a half-written snapshot behind.

use std::path::{Path, PathBuf};
use shadow_ranch_core::{ProgressState, UserProfile};
use tokio::fs;
use tracing::debug;
use super::trait_::{decode_snapshot, validate_key};
use super::{ProfileStorage, SnapshotStore, Result};

/// File-based snapshot store for track progress.
pub struct JsonSnapshotStore {
    root: PathBuf,
}

impl JsonSnapshotStore {
    /// Create the store, creating `<root>/progress` if needed.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().join("progress");
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn snapshot_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn save(&mut self, key: &str, state: &ProgressState) -> Result<()> {
        let path = self.snapshot_path(key)?;
        let json = serde_json::to_string_pretty(state)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json.as_bytes())?;
        std::fs::rename(&tmp, &path)?;
        debug!(key, path = %path.display(), "saved progress snapshot");
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<ProgressState>> {
        let path = self.snapshot_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(json) => Ok(decode_snapshot(key, &json)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// File-based profile storage backend.
pub struct JsonProfileStorage {
    root: PathBuf,
}

impl JsonProfileStorage {
    /// Create storage, creating `<root>/profiles` if needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().join("profiles");
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    fn profile_path(&self, public_key: &str) -> Result<PathBuf> {
        validate_key(public_key)?;
        Ok(self.root.join(format!("{}.json", public_key)))
    }
}

#[async_trait::async_trait]
impl ProfileStorage for JsonProfileStorage {
    async fn save_profile(&mut self, profile: &UserProfile) -> Result<()> {
        let path = self.profile_path(&profile.public_key)?;
        let json = serde_json::to_string_pretty(profile)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json.as_bytes()).await?;
        fs::rename(&tmp, &path).await?;
        debug!(public_key = %profile.public_key, "saved profile");
        Ok(())
    }

    async fn load_profile(&self, public_key: &str) -> Result<Option<UserProfile>> {
        read_json(&self.profile_path(public_key)?).await
    }

    async fn list_profiles(&self) -> Result<Vec<UserProfile>> {
        list_dir(&self.root).await
    }

    async fn delete_profile(&mut self, public_key: &str) -> Result<()> {
        fs::remove_file(self.profile_path(public_key)?).await.or_else(|e| {
            if e.kind() == std::io::ErrorKind::NotFound { Ok(()) } else { Err(e) }
        })?;
        Ok(())
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(json) => {
            let value = serde_json::from_str(&json)?;
            Ok(Some(value))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut items = Vec::new();
    let mut rd = fs::read_dir(dir).await?;
    while let Some(entry) = rd.next_entry().await? {
        if entry.path().extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        if let Ok(Some(item)) = read_json(&entry.path()).await {
            items.push(item);
        }
    }
    Ok(items)
}
