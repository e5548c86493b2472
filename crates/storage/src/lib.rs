//! Storage abstraction and implementations for Shadow Ranch.
//!
//! Progress snapshots go through the synchronous [`SnapshotStore`] trait;
//! learner profiles through the async [`ProfileStorage`] trait. JSON file
//! backends are provided for both, plus an in-memory snapshot store.

#![warn(missing_docs)]

pub mod trait_;
pub mod json_storage;
pub mod memory;

pub use trait_::{SnapshotStore, ProfileStorage, StorageError, Result};
pub use json_storage::{JsonSnapshotStore, JsonProfileStorage};
pub use memory::MemorySnapshotStore;
