//! Error types for the seeker crate.
//!
//! The engine itself never fails: every execution path degrades to an empty
//! or truncated result. Errors only come out of strict parsing, for callers
//! that want to reject a value instead of falling back.

use thiserror::Error;

/// Errors produced by strict parsing of query inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeekerError {
    /// The sort key is not one of `new`, `old`, `hit`, `name`.
    #[error("unknown sort key '{0}'")]
    UnknownSort(String),

    /// The search field name is empty.
    #[error("search field name cannot be empty")]
    EmptySearchField,
}

/// Result type for seeker operations.
pub type Result<T> = std::result::Result<T, SeekerError>;
