//! Errors raised while building core models.

use crate::id::ModuleId;

/// Error type for core model construction.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur when validating catalogs or configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A catalog must contain at least one module
    #[error("module catalog is empty")]
    EmptyCatalog,

    /// Module ids start at 1
    #[error("module id must be positive, got {0}")]
    NonPositiveModuleId(ModuleId),

    /// The same id appears twice
    #[error("duplicate module id {0}")]
    DuplicateModuleId(ModuleId),

    /// Ids must be listed in ascending order
    #[error("module {next} is listed after {previous}; catalog must be in ascending id order")]
    UnorderedCatalog {
        /// Id seen first
        previous: ModuleId,
        /// Id seen after it
        next: ModuleId,
    },

    /// Ids must have no gaps, otherwise a module can never be unlocked
    #[error("module {next} follows {previous}; ids must be contiguous")]
    NonContiguousCatalog {
        /// Id seen first
        previous: ModuleId,
        /// Id seen after it
        next: ModuleId,
    },

    /// Invalid track denominator or cap
    #[error("invalid track config: {0}")]
    InvalidTrackConfig(String),
}
