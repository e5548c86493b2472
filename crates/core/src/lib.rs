//! Shadow Ranch core data models.
//!
//! Modules, track catalogs and progress state for the learning tracks, plus
//! the learner profile and badge models.

#![warn(missing_docs)]

// Identities and errors
mod id;
mod error;

// Track progress
mod module;
mod catalog;
mod progress;
mod track;

// Learner profile
mod badge;
mod profile;

// Collaborator payloads
mod validation;
mod wallet;

// Re-exports
pub use id::{ModuleId, BadgeId};
pub use error::{CoreError, Result};

pub use module::{Module, ModuleStatus};
pub use catalog::ModuleCatalog;
pub use progress::{ProgressState, TrackConfig, Aggregate, derive_aggregate};
pub use track::{Track, CYPHERPUNK_STORAGE_KEY, SOLANA_CHALLENGE_STORAGE_KEY};

pub use badge::{NftBadge, Rarity, default_badges, challenge_badge, known_badge, badges};
pub use profile::{UserProfile, ProfileUpdate};

pub use validation::ValidationOutcome;
pub use wallet::WalletSession;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
