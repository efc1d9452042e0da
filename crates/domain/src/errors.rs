//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for DueDash
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum DueDashError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    /// No session, or a session without a bearer token.
    #[error("Unauthorized")]
    Unauthorized,

    /// The upstream calendar API answered with a non-success status or an
    /// unreadable body.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DueDashError {
    /// True for failures that belong to the upstream call (transport,
    /// timeout, or upstream status).
    pub fn is_upstream_failure(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout(_) | Self::Upstream(_))
    }
}

/// Result type alias for DueDash operations
pub type Result<T> = std::result::Result<T, DueDashError>;
