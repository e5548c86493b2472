//! Progress state for one track and the pure aggregate derivation.

use serde::{Deserialize, Serialize};
use crate::catalog::ModuleCatalog;
use crate::error::{CoreError, Result};
use crate::id::ModuleId;
use crate::module::Module;

/// Snapshot of a learner's progress through one track.
///
/// This is the unit that gets persisted; field names follow the
/// `modules` / `currentModule` / `trackProgress` layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressState {
    /// Modules in catalog order
    pub modules: Vec<Module>,

    /// First unlocked, incomplete module (or the last assigned value)
    pub current_module: ModuleId,

    /// Derived percentage, 0-100
    pub track_progress: u8,
}

impl ProgressState {
    /// Fresh state seeded from a catalog.
    pub fn fresh(catalog: &ModuleCatalog) -> Self {
        Self {
            modules: catalog.initial_modules(),
            current_module: catalog.first_id(),
            track_progress: 0,
        }
    }

    /// Look up a module by id.
    pub fn module(&self, id: ModuleId) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    /// Number of completed modules.
    pub fn completed_count(&self) -> usize {
        self.modules.iter().filter(|m| m.is_completed).count()
    }

    /// Whether this snapshot describes the same module sequence as `catalog`
    /// and is reachable through the unlock rules: the first module is
    /// unlocked, nothing is completed while locked, and every later module
    /// is unlocked only if its predecessor is completed.
    ///
    /// Used to reject stale or tampered snapshots on load.
    pub fn is_consistent_with(&self, catalog: &ModuleCatalog) -> bool {
        if self.modules.len() != catalog.len() {
            return false;
        }
        if !self.modules.iter().map(|m| m.id).eq(catalog.ids()) {
            return false;
        }
        if !self.modules.first().map(|m| m.is_unlocked).unwrap_or(false) {
            return false;
        }
        if self.modules.iter().any(|m| m.is_completed && !m.is_unlocked) {
            return false;
        }
        let skipped = self
            .modules
            .windows(2)
            .any(|pair| pair[1].is_unlocked && !pair[0].is_completed);
        if skipped {
            return false;
        }
        self.track_progress <= 100 && catalog.contains(self.current_module)
    }
}

/// How completed modules translate into a track percentage.
///
/// A track may be only a partial contributor to overall progress, so the
/// percentage saturates at `cap_percentage` once `denominator` modules are
/// complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackConfig {
    denominator: u32,
    cap_percentage: u8,
}

impl TrackConfig {
    /// Validate and create a configuration.
    pub fn new(denominator: u32, cap_percentage: u8) -> Result<Self> {
        if denominator == 0 {
            return Err(CoreError::InvalidTrackConfig(
                "denominator must be at least 1".to_string(),
            ));
        }
        if cap_percentage > 100 {
            return Err(CoreError::InvalidTrackConfig(format!(
                "cap percentage {} exceeds 100",
                cap_percentage
            )));
        }
        Ok(Self { denominator, cap_percentage })
    }

    /// Modules needed to reach the cap.
    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Maximum percentage this track contributes.
    pub fn cap_percentage(&self) -> u8 {
        self.cap_percentage
    }

    /// `round(min(completed, denominator) / denominator * cap)`, rounding
    /// halves up.
    pub fn percentage_for(&self, completed: usize) -> u8 {
        let counted = (completed as u64).min(self.denominator as u64);
        let denominator = self.denominator as u64;
        let cap = self.cap_percentage as u64;
        let rounded = (2 * counted * cap + denominator) / (2 * denominator);
        // counted <= denominator, so rounded <= cap <= 100
        rounded as u8
    }
}

impl Default for TrackConfig {
    /// Four modules make up the cypherpunk legacy share of 67%.
    fn default() -> Self {
        Self {
            denominator: 4,
            cap_percentage: 67,
        }
    }
}

/// Derived fields of a [`ProgressState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregate {
    /// First unlocked, incomplete module, or the fallback
    pub current_module: ModuleId,
    /// Track percentage
    pub track_progress: u8,
}

/// Recompute the derived fields from the module list.
///
/// `fallback` becomes `current_module` when no unlocked module is left to
/// work on.
pub fn derive_aggregate(modules: &[Module], config: &TrackConfig, fallback: ModuleId) -> Aggregate {
    let completed = modules.iter().filter(|m| m.is_completed).count();
    let current_module = modules
        .iter()
        .find(|m| m.is_available())
        .map(|m| m.id)
        .unwrap_or(fallback);

    Aggregate {
        current_module,
        track_progress: config.percentage_for(completed),
    }
}
