//! Module model - one unit of sequential learning content.

use serde::{Deserialize, Serialize};
use crate::id::ModuleId;

/// A learning module with its lock/complete status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    /// Unique identifier, ascending = prerequisite order
    pub id: ModuleId,

    /// Display title
    pub title: String,

    /// Whether the learner finished this module
    pub is_completed: bool,

    /// Whether the module can be worked on
    pub is_unlocked: bool,
}

impl Module {
    /// Create a locked, incomplete module.
    pub fn new(id: ModuleId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            is_completed: false,
            is_unlocked: false,
        }
    }

    /// Current automaton state of this module.
    pub fn status(&self) -> ModuleStatus {
        match (self.is_unlocked, self.is_completed) {
            (_, true) => ModuleStatus::Completed,
            (true, false) => ModuleStatus::Unlocked,
            (false, false) => ModuleStatus::Locked,
        }
    }

    /// Unlocked and not yet completed.
    pub fn is_available(&self) -> bool {
        self.is_unlocked && !self.is_completed
    }
}

/// Lifecycle of a single module.
///
/// `Locked -> Unlocked` happens when the preceding module completes,
/// `Unlocked -> Completed` when the learner completes this one. `Completed`
/// is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModuleStatus {
    /// Not yet reachable
    Locked,
    /// Reachable, not finished
    Unlocked,
    /// Finished
    Completed,
}

impl ModuleStatus {
    /// Short label for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleStatus::Locked => "LOCKED",
            ModuleStatus::Unlocked => "UNLOCKED",
            ModuleStatus::Completed => "COMPLETED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_flags() {
        let mut module = Module::new(ModuleId::new(2), "B");
        assert_eq!(module.status(), ModuleStatus::Locked);
        assert!(!module.is_available());

        module.is_unlocked = true;
        assert_eq!(module.status(), ModuleStatus::Unlocked);
        assert!(module.is_available());

        module.is_completed = true;
        assert_eq!(module.status(), ModuleStatus::Completed);
        assert!(!module.is_available());
    }

    #[test]
    fn test_module_camel_case_layout() {
        let module = Module::new(ModuleId::new(1), "A");
        let json = serde_json::to_value(&module).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "A");
        assert_eq!(json["isCompleted"], false);
        assert_eq!(json["isUnlocked"], false);
    }
}
