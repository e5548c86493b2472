//! Progress store - the module unlock state machine.
//!
//! The store owns the authoritative in-memory [`ProgressState`] for one
//! track. Every mutation recomputes the derived fields and then writes a
//! snapshot through the injected [`SnapshotStore`]. Persistence failures are
//! logged and absorbed: losing durability never blocks the learner.

use shadow_ranch_core::{
    derive_aggregate, Module, ModuleCatalog, ModuleId, ModuleStatus, ProgressState, Track,
    TrackConfig, ValidationOutcome, CYPHERPUNK_STORAGE_KEY,
};
use shadow_ranch_storage::SnapshotStore;
use tracing::{debug, info, warn};

/// Storage key used when no track is chosen.
pub const DEFAULT_STORAGE_KEY: &str = CYPHERPUNK_STORAGE_KEY;

/// Error type for progress operations.
pub type Result<T> = std::result::Result<T, ProgressError>;

/// Errors surfaced to callers of the progress store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProgressError {
    /// The id is not part of the catalog
    #[error("invalid module id {0}")]
    InvalidModuleId(ModuleId),

    /// The module has not been unlocked yet
    #[error("module {0} is locked")]
    ModuleLocked(ModuleId),
}

/// What a successful `complete_module` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The module went from unlocked to completed
    Completed {
        /// Module unlocked as a consequence, if any
        unlocked: Option<ModuleId>,
    },
    /// The module was already completed; nothing changed
    AlreadyCompleted,
}

/// Where the initial state came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateOrigin {
    /// No snapshot existed
    Fresh,
    /// Restored from a snapshot
    Restored,
    /// A snapshot existed but did not match the catalog or broke the
    /// unlock rules, or the medium could not be read
    Discarded,
}

/// Progress store for a single track, bound to one storage key.
pub struct ProgressStore<S: SnapshotStore> {
    catalog: ModuleCatalog,
    config: TrackConfig,
    storage: S,
    key: String,
    state: ProgressState,
    origin: StateOrigin,
    persistent: bool,
}

impl<S: SnapshotStore> ProgressStore<S> {
    /// Open the store, restoring the snapshot under `key` if there is a
    /// usable one.
    pub fn open(catalog: ModuleCatalog, config: TrackConfig, storage: S, key: impl Into<String>) -> Self {
        let key = key.into();

        let (state, origin) = match storage.load(&key) {
            Ok(Some(snapshot)) if snapshot.is_consistent_with(&catalog) => {
                let mut state = snapshot;
                let aggregate = derive_aggregate(&state.modules, &config, state.current_module);
                state.current_module = aggregate.current_module;
                state.track_progress = aggregate.track_progress;
                debug!(key = %key, "restored progress snapshot");
                (state, StateOrigin::Restored)
            }
            Ok(Some(_)) => {
                warn!(key = %key, "progress snapshot is inconsistent with the catalog, starting fresh");
                (ProgressState::fresh(&catalog), StateOrigin::Discarded)
            }
            Ok(None) => (ProgressState::fresh(&catalog), StateOrigin::Fresh),
            Err(e) => {
                warn!(key = %key, error = %e, "could not load progress snapshot, starting fresh");
                (ProgressState::fresh(&catalog), StateOrigin::Discarded)
            }
        };

        Self {
            catalog,
            config,
            storage,
            key,
            state,
            origin,
            persistent: true,
        }
    }

    /// Open a shipped track under its own storage key and configuration.
    pub fn for_track(track: Track, storage: S) -> Self {
        Self::open(track.catalog(), track.default_config(), storage, track.storage_key())
    }

    /// Open the cypherpunk legacy track with the default configuration.
    pub fn cypherpunk(storage: S) -> Self {
        Self::for_track(Track::CypherpunkLegacy, storage)
    }

    /// Mark a module as completed and unlock its successor.
    ///
    /// Validation happens before any mutation: an unknown or locked id
    /// leaves the state untouched. Completing an already completed module
    /// is a no-op.
    pub fn complete_module(&mut self, id: ModuleId) -> Result<Completion> {
        let index = self
            .state
            .modules
            .iter()
            .position(|m| m.id == id)
            .ok_or(ProgressError::InvalidModuleId(id))?;

        let completion = match self.state.modules[index].status() {
            ModuleStatus::Locked => return Err(ProgressError::ModuleLocked(id)),
            ModuleStatus::Completed => Completion::AlreadyCompleted,
            ModuleStatus::Unlocked => {
                self.state.modules[index].is_completed = true;
                let unlocked = id.next().and_then(|next| {
                    let module = self.state.modules.iter_mut().find(|m| m.id == next)?;
                    let newly = !module.is_unlocked;
                    module.is_unlocked = true;
                    newly.then_some(next)
                });
                Completion::Completed { unlocked }
            }
        };

        self.recompute(id);

        match completion {
            Completion::Completed { unlocked } => info!(
                module = %id,
                unlocked = ?unlocked.map(ModuleId::get),
                progress = self.state.track_progress,
                "module completed"
            ),
            Completion::AlreadyCompleted => debug!(module = %id, "module already completed"),
        }

        self.persist();
        Ok(completion)
    }

    /// Complete `id` when the editor reports a passing submission.
    ///
    /// Returns whether the submission passed. A failing outcome changes
    /// nothing.
    pub fn apply_validation(&mut self, id: ModuleId, outcome: &ValidationOutcome) -> Result<bool> {
        if !outcome.success {
            debug!(module = %id, errors = outcome.errors.len(), "validation failed");
            return Ok(false);
        }
        self.complete_module(id)?;
        Ok(true)
    }

    /// Return every module to its catalog default.
    pub fn reset_progress(&mut self) {
        self.state = ProgressState::fresh(&self.catalog);
        info!(key = %self.key, "progress reset");
        self.persist();
    }

    /// First unlocked, incomplete module.
    pub fn current_module(&self) -> ModuleId {
        self.state.current_module
    }

    /// Track percentage in `[0, 100]`.
    pub fn track_progress(&self) -> u8 {
        self.state.track_progress
    }

    /// Copy of the full state.
    pub fn snapshot(&self) -> ProgressState {
        self.state.clone()
    }

    /// Modules in catalog order.
    pub fn modules(&self) -> &[Module] {
        &self.state.modules
    }

    /// Look up a module.
    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.state.module(id)
    }

    /// Number of completed modules.
    pub fn completed_count(&self) -> usize {
        self.state.completed_count()
    }

    /// Whether the track contributes its full share.
    pub fn is_track_complete(&self) -> bool {
        self.completed_count() >= self.config.denominator() as usize
    }

    /// Track configuration.
    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    /// Storage key bound at construction.
    pub fn storage_key(&self) -> &str {
        &self.key
    }

    /// How the initial state was obtained.
    pub fn origin(&self) -> StateOrigin {
        self.origin
    }

    /// Whether the most recent write reached the storage medium.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    fn recompute(&mut self, fallback: ModuleId) {
        let aggregate = derive_aggregate(&self.state.modules, &self.config, fallback);
        self.state.current_module = aggregate.current_module;
        self.state.track_progress = aggregate.track_progress;
    }

    fn persist(&mut self) {
        match self.storage.save(&self.key, &self.state) {
            Ok(()) => self.persistent = true,
            Err(e) => {
                if self.persistent {
                    warn!(key = %self.key, error = %e, "progress not persisted, keeping in-memory state");
                }
                self.persistent = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadow_ranch_storage::MemorySnapshotStore;

    const KEY: &str = "test-progress";

    fn catalog() -> ModuleCatalog {
        ModuleCatalog::new([
            (ModuleId::new(1), "A"),
            (ModuleId::new(2), "B"),
            (ModuleId::new(3), "C"),
            (ModuleId::new(4), "D"),
        ])
        .unwrap()
    }

    fn store() -> ProgressStore<MemorySnapshotStore> {
        ProgressStore::open(catalog(), TrackConfig::default(), MemorySnapshotStore::new(), KEY)
    }

    fn id(n: u32) -> ModuleId {
        ModuleId::new(n)
    }

    #[test]
    fn test_fresh_state() {
        let store = store();
        assert_eq!(store.current_module(), id(1));
        assert_eq!(store.track_progress(), 0);
        assert_eq!(store.origin(), StateOrigin::Fresh);
    }

    #[test]
    fn test_complete_first_module() {
        let mut store = store();
        let completion = store.complete_module(id(1)).unwrap();
        assert_eq!(completion, Completion::Completed { unlocked: Some(id(2)) });

        assert!(store.module(id(1)).unwrap().is_completed);
        assert!(store.module(id(2)).unwrap().is_unlocked);
        assert!(!store.module(id(3)).unwrap().is_unlocked);
        assert_eq!(store.current_module(), id(2));
        assert_eq!(store.track_progress(), 17);
    }

    #[test]
    fn test_complete_whole_track_falls_back_to_last() {
        let mut store = store();
        for n in 1..=4 {
            store.complete_module(id(n)).unwrap();
        }
        assert_eq!(store.track_progress(), 67);
        assert_eq!(store.current_module(), id(4));
        assert!(store.is_track_complete());
    }

    #[test]
    fn test_last_module_unlocks_nothing() {
        let mut store = store();
        for n in 1..=3 {
            store.complete_module(id(n)).unwrap();
        }
        assert_eq!(
            store.complete_module(id(4)).unwrap(),
            Completion::Completed { unlocked: None }
        );
    }

    #[test]
    fn test_invalid_module_id_leaves_state() {
        let mut store = store();
        let before = store.snapshot();
        assert_eq!(store.complete_module(id(99)), Err(ProgressError::InvalidModuleId(id(99))));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_locked_module_cannot_complete() {
        let mut store = store();
        let before = store.snapshot();
        assert_eq!(store.complete_module(id(3)), Err(ProgressError::ModuleLocked(id(3))));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_complete_is_idempotent() {
        let mut store = store();
        store.complete_module(id(1)).unwrap();
        let once = store.snapshot();
        assert_eq!(store.complete_module(id(1)).unwrap(), Completion::AlreadyCompleted);
        assert_eq!(store.snapshot(), once);
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let mut store = store();
        let fresh = store.snapshot();
        for n in 1..=4 {
            store.complete_module(id(n)).unwrap();
        }
        store.reset_progress();
        assert_eq!(store.snapshot(), fresh);
    }

    #[test]
    fn test_every_mutation_is_saved() {
        let mut store = store();
        store.complete_module(id(1)).unwrap();
        let saved = store.storage.load(KEY).unwrap().unwrap();
        assert_eq!(saved, store.snapshot());

        store.reset_progress();
        let saved = store.storage.load(KEY).unwrap().unwrap();
        assert_eq!(saved.track_progress, 0);
    }

    #[test]
    fn test_restores_previous_session() {
        let mut storage = MemorySnapshotStore::new();
        {
            let mut first = ProgressStore::open(catalog(), TrackConfig::default(), MemorySnapshotStore::new(), KEY);
            first.complete_module(id(1)).unwrap();
            first.complete_module(id(2)).unwrap();
            storage.save(KEY, &first.snapshot()).unwrap();
        }
        let second = ProgressStore::open(catalog(), TrackConfig::default(), storage, KEY);
        assert_eq!(second.origin(), StateOrigin::Restored);
        assert_eq!(second.current_module(), id(3));
        assert_eq!(second.track_progress(), 34);
    }

    #[test]
    fn test_corrupt_snapshot_starts_fresh() {
        let mut storage = MemorySnapshotStore::new();
        storage.insert_raw(KEY, "{\"modules\": 12");
        let store = ProgressStore::open(catalog(), TrackConfig::default(), storage, KEY);
        assert_eq!(store.origin(), StateOrigin::Fresh);
        assert_eq!(store.current_module(), id(1));
        assert_eq!(store.track_progress(), 0);
    }

    #[test]
    fn test_snapshot_from_other_catalog_is_discarded() {
        let mut storage = MemorySnapshotStore::new();
        let other = ModuleCatalog::new([(ModuleId::new(1), "A"), (ModuleId::new(2), "B")]).unwrap();
        storage.save(KEY, &ProgressState::fresh(&other)).unwrap();
        let store = ProgressStore::open(catalog(), TrackConfig::default(), storage, KEY);
        assert_eq!(store.origin(), StateOrigin::Discarded);
        assert_eq!(store.modules().len(), 4);
    }

    #[test]
    fn test_snapshot_with_locked_first_module_is_discarded() {
        let mut stuck = ProgressState::fresh(&catalog());
        stuck.modules[0].is_unlocked = false;
        let mut storage = MemorySnapshotStore::new();
        storage.save(KEY, &stuck).unwrap();

        let mut store = ProgressStore::open(catalog(), TrackConfig::default(), storage, KEY);
        assert_eq!(store.origin(), StateOrigin::Discarded);
        assert!(store.complete_module(id(1)).is_ok());
        assert_eq!(store.current_module(), id(2));
    }

    #[test]
    fn test_snapshot_with_skipped_modules_is_discarded() {
        let mut skipped = ProgressState::fresh(&catalog());
        skipped.modules[3].is_unlocked = true;
        skipped.modules[3].is_completed = true;
        skipped.track_progress = 17;
        let mut storage = MemorySnapshotStore::new();
        storage.save(KEY, &skipped).unwrap();

        let store = ProgressStore::open(catalog(), TrackConfig::default(), storage, KEY);
        assert_eq!(store.origin(), StateOrigin::Discarded);
        assert_eq!(store.track_progress(), 0);
        assert!(!store.module(id(4)).unwrap().is_completed);
        assert!(!store.module(id(4)).unwrap().is_unlocked);
    }

    #[test]
    fn test_write_failure_is_absorbed() {
        let mut store = ProgressStore::open(catalog(), TrackConfig::default(), MemorySnapshotStore::read_only(), KEY);
        assert!(store.is_persistent());
        store.complete_module(id(1)).unwrap();
        assert!(!store.is_persistent());
        assert_eq!(store.current_module(), id(2));
        assert_eq!(store.track_progress(), 17);
    }

    #[test]
    fn test_apply_validation() {
        let mut store = store();
        let failed = ValidationOutcome::failed(vec!["missing #[program]".to_string()]);
        assert!(!store.apply_validation(id(1), &failed).unwrap());
        assert_eq!(store.completed_count(), 0);

        let passed = ValidationOutcome::passed("nice work");
        assert!(store.apply_validation(id(1), &passed).unwrap());
        assert_eq!(store.current_module(), id(2));

        assert_eq!(
            store.apply_validation(id(42), &passed),
            Err(ProgressError::InvalidModuleId(id(42)))
        );
    }

    #[test]
    fn test_custom_track_config() {
        let mut store = ProgressStore::open(
            catalog(),
            TrackConfig::new(2, 100).unwrap(),
            MemorySnapshotStore::new(),
            KEY,
        );
        store.complete_module(id(1)).unwrap();
        assert_eq!(store.track_progress(), 50);
        store.complete_module(id(2)).unwrap();
        assert_eq!(store.track_progress(), 100);
        store.complete_module(id(3)).unwrap();
        assert_eq!(store.track_progress(), 100);
    }

    #[test]
    fn test_solana_track_is_separate() {
        let mut storage = MemorySnapshotStore::new();
        {
            let mut cypherpunk = ProgressStore::cypherpunk(MemorySnapshotStore::new());
            cypherpunk.complete_module(id(1)).unwrap();
            storage.save(DEFAULT_STORAGE_KEY, &cypherpunk.snapshot()).unwrap();
        }

        let mut solana = ProgressStore::for_track(Track::SolanaChallenges, storage);
        assert_eq!(solana.storage_key(), "solana-challenge-progress");
        assert_eq!(solana.origin(), StateOrigin::Fresh);
        assert_eq!(solana.modules().len(), 10);

        solana.complete_module(id(1)).unwrap();
        assert_eq!(solana.track_progress(), 10);
    }

    #[test]
    fn test_cypherpunk_defaults() {
        let store = ProgressStore::cypherpunk(MemorySnapshotStore::new());
        assert_eq!(store.storage_key(), DEFAULT_STORAGE_KEY);
        assert_eq!(store.modules().len(), 6);
        assert_eq!(store.config().cap_percentage(), 67);
    }
}
