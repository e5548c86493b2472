//! Learning tracks shipped with the app.

use serde::{Deserialize, Serialize};
use crate::catalog::ModuleCatalog;
use crate::progress::TrackConfig;

/// Storage key of the cypherpunk legacy track.
pub const CYPHERPUNK_STORAGE_KEY: &str = "cypherpunk-progress-storage";

/// Storage key of the Solana coding-challenge track.
pub const SOLANA_CHALLENGE_STORAGE_KEY: &str = "solana-challenge-progress";

/// A named, ordered set of modules with its own progress snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Track {
    /// History and ethos of the cypherpunk movement
    CypherpunkLegacy,
    /// Hands-on Anchor programming challenges
    SolanaChallenges,
}

impl Track {
    /// Module catalog of this track.
    pub fn catalog(&self) -> ModuleCatalog {
        match self {
            Track::CypherpunkLegacy => ModuleCatalog::cypherpunk_legacy(),
            Track::SolanaChallenges => ModuleCatalog::solana_challenges(),
        }
    }

    /// Fixed storage key of this track's snapshot.
    pub fn storage_key(&self) -> &'static str {
        match self {
            Track::CypherpunkLegacy => CYPHERPUNK_STORAGE_KEY,
            Track::SolanaChallenges => SOLANA_CHALLENGE_STORAGE_KEY,
        }
    }

    /// How completions translate into a percentage.
    ///
    /// The cypherpunk track is a partial contributor (4 modules, 67%);
    /// the challenge track counts every challenge toward a full 100%.
    pub fn default_config(&self) -> TrackConfig {
        match self {
            Track::CypherpunkLegacy => TrackConfig::default(),
            Track::SolanaChallenges => TrackConfig::new(self.catalog().len() as u32, 100)
                .unwrap_or_default(),
        }
    }

    /// Short label for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Track::CypherpunkLegacy => "cypherpunk",
            Track::SolanaChallenges => "solana",
        }
    }
}
