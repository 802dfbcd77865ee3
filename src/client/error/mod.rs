//! Error types for the zdungeon client layer.
//!
//! Domain specific errors (configuration, backend access) are aggregated into the
//! single [`Error`] type so that `?` can be used across the store, service and
//! scheduler layers. Remote wrappers that must never fail loudly convert an
//! [`Error`] into a safe default after logging it with [`Error::category`].

pub mod backend;
pub mod config;

use std::sync::Arc;

use thiserror::Error;

use crate::client::error::{backend::BackendError, config::ConfigError};

/// Main error type for the zdungeon client.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Backend errors (transport, status, decoding, business rejection)
/// - Parse errors (invalid schedule values, dates)
/// - Internal errors (bugs in this crate)
/// - Shared errors (one failure reported to every caller of a coalesced reload)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Error returned while calling the managed backend.
    #[error(transparent)]
    BackendError(#[from] BackendError),
    /// Parse error (failed to build a date, time or other value).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in zdungeon's code.
    #[error("Internal error with zdungeon's code, this indicates a bug: {0:?}")]
    InternalError(String),
    /// A single failure observed by several callers.
    #[error(transparent)]
    Shared(Arc<Error>),
}

impl Error {
    /// Short category label used as the prefix of logged and reported failures.
    pub fn category(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "Configuration error",
            Self::BackendError(BackendError::Transport(_)) => "Network error",
            Self::BackendError(BackendError::Timeout(_)) => "Network error",
            Self::BackendError(BackendError::Status { .. }) => "Backend error",
            Self::BackendError(BackendError::Decode(_)) => "Decode error",
            Self::BackendError(BackendError::Rejected(_)) => "Reset rejected",
            Self::ParseError(_) => "Parse error",
            Self::InternalError(_) => "Internal error",
            Self::Shared(err) => err.category(),
        }
    }

    /// Renders the error as `"<category>: <detail>"`.
    pub fn to_report(&self) -> String {
        format!("{}: {}", self.category(), self)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::BackendError(BackendError::Transport(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::BackendError(BackendError::Decode(err))
    }
}
