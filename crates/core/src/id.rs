//! Identifiers for Shadow Ranch entities.

use serde::{Deserialize, Serialize};

/// Identifier of a learning module.
///
/// Module ids are positive and their ascending order is the prerequisite
/// order of a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(u32);

impl ModuleId {
    /// Create a module id.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw numeric value.
    pub const fn get(self) -> u32 {
        self.0
    }

    /// The id immediately after this one, if representable.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl From<u32> for ModuleId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for ModuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::str::FromStr for ModuleId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Identifier of an achievement badge (e.g. `first-lesson`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BadgeId(String);

impl BadgeId {
    /// Create a badge id.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BadgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BadgeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_id_parse_and_next() {
        let id: ModuleId = "3".parse().unwrap();
        assert_eq!(id.get(), 3);
        assert_eq!(id.next(), Some(ModuleId::new(4)));
        assert_eq!(ModuleId::new(u32::MAX).next(), None);
        assert!("abc".parse::<ModuleId>().is_err());
    }

    #[test]
    fn test_module_id_serializes_as_number() {
        let json = serde_json::to_string(&ModuleId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
