//! Error types for list screens.
//!
//! The query pipeline itself never fails. What can fail is loading screen
//! configuration and talking to the record repository, which belongs to the
//! external data layer.

use pacer_seeker::RecordId;
use thiserror::Error;

/// Errors raised while loading or validating screen configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The YAML document could not be parsed.
    #[error("invalid screen config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The JSON document could not be parsed.
    #[error("invalid screen config JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A parsed value breaks a config rule.
    #[error("screen '{screen}': {reason}")]
    Invalid { screen: String, reason: String },

    /// No built-in preset has this name.
    #[error("unknown screen preset '{0}'")]
    UnknownPreset(String),
}

impl ConfigError {
    pub(crate) fn invalid(screen: &str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            screen: screen.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors from [`InMemoryRepository`](crate::InMemoryRepository).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// No record has this id.
    #[error("record {0} not found")]
    NotFound(RecordId),

    /// A record with this id already exists.
    #[error("record {0} already exists")]
    Duplicate(RecordId),
}

/// Errors surfaced by a [`ListController`](crate::ListController).
///
/// Only the repository can fail; the wrapped error is whatever the injected
/// repository reports.
#[derive(Debug, Error)]
pub enum ListError<E: std::error::Error + 'static> {
    #[error("repository error: {0}")]
    Repository(#[source] E),
}

impl<E: std::error::Error + 'static> ListError<E> {
    /// The repository's own error.
    pub fn into_inner(self) -> E {
        match self {
            ListError::Repository(e) => e,
        }
    }
}
