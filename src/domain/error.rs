//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Violations reported by strict listing decoding.
///
/// Tree construction itself never fails; these only surface when a caller
/// asks for validation up front.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DomainError {
    #[error("listing is not a list of entries")]
    MalformedListing,

    #[error("invalid entry at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("entry at index {index} has an empty path")]
    EmptyPath { index: usize },

    #[error("duplicate path in listing: {0}")]
    DuplicatePath(String),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
