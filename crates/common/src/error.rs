//! Error types for scenariogen

use thiserror::Error;

/// Result type alias using the scenariogen Error
pub type Result<T> = std::result::Result<T, Error>;

/// Scenariogen error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("requirement_text must be a string (got {found})")]
    RequirementType { found: &'static str },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
