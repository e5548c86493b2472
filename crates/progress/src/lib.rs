//! Progress tracking for Shadow Ranch learning tracks.
//!
//! The [`ProgressStore`] state machine, badge awarding and the learner
//! profile service.

#![warn(missing_docs)]

pub mod tracker;
pub mod achievements;
pub mod profile;

pub use tracker::{
    ProgressStore, ProgressError, Completion, StateOrigin, Result, DEFAULT_STORAGE_KEY,
};
pub use achievements::BadgeAwarder;
pub use profile::{ProfileService, ProfileError};
