//! Error types
//!
//! The core does no I/O during play, so nearly every error is a bad
//! configuration or a bad call. Loading settings from disk adds the rest.

/// Errors produced by the simulation core
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        field: &'static str,
        reason: &'static str,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
