//! Authenticated user session

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session established by the login flow
///
/// The bearer token is opaque to DueDash; it is only forwarded to the
/// upstream calendar API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub id: String,
    #[serde(skip_serializing)]
    pub access_token: Option<String>,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
    /// `None` never expires.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl UserSession {
    pub fn new(id: impl Into<String>, access_token: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            access_token: Some(access_token.into()),
            email: None,
            created_at,
            expires_at: None,
        }
    }

    #[must_use]
    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// True once `now` reaches `expires_at`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }

    /// Bearer token, if the session carries a non-empty one.
    pub fn bearer_token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|token| !token.trim().is_empty())
    }
}
