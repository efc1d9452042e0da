//! Authenticated calendar proxy
//!
//! Forwards one listing request upstream on behalf of a session and
//! republishes the items. Every failure collapses into one of two flat
//! shapes; upstream detail only reaches the operator log.

use std::sync::Arc;
use std::time::Duration;

use duedash_domain::constants::DEFAULT_UPSTREAM_TIMEOUT_SECS;
use duedash_domain::{DueDashError, UserSession};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, warn};

use super::ports::{CalendarEventSource, UpcomingEventsQuery};
use crate::clock::Clock;

/// Client-facing proxy failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProxyError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Internal server error")]
    Internal,
}

impl ProxyError {
    /// Flat `{ "error": ... }` body.
    pub fn body(self) -> ErrorBody {
        ErrorBody { error: self.to_string() }
    }
}

impl From<ProxyError> for DueDashError {
    fn from(value: ProxyError) -> Self {
        match value {
            ProxyError::Unauthorized => DueDashError::Unauthorized,
            ProxyError::Internal => DueDashError::Internal("Internal server error".to_string()),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Success response body; `events` is the upstream `items` array verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsBody {
    pub events: Vec<Value>,
}

/// Proxy use case over a [`CalendarEventSource`]
pub struct CalendarProxy {
    source: Arc<dyn CalendarEventSource>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl CalendarProxy {
    pub fn new(source: Arc<dyn CalendarEventSource>, clock: Arc<dyn Clock>) -> Self {
        Self { source, clock, timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS) }
    }

    /// Upper bound for the whole upstream call; expiry counts as an
    /// upstream failure.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch upcoming events for `session`.
    ///
    /// No upstream call is made unless the session carries a non-empty
    /// bearer token.
    ///
    /// # Errors
    /// [`ProxyError::Unauthorized`] without a usable session,
    /// [`ProxyError::Internal`] for any upstream failure or timeout.
    pub async fn fetch_upcoming(
        &self,
        session: Option<&UserSession>,
    ) -> Result<Vec<Value>, ProxyError> {
        let Some(token) = session.and_then(UserSession::bearer_token) else {
            warn!(has_session = session.is_some(), "calendar proxy called without a bearer token");
            return Err(ProxyError::Unauthorized);
        };

        let query = UpcomingEventsQuery::starting_at(self.clock.now());

        match tokio::time::timeout(self.timeout, self.source.list_upcoming(token, &query)).await {
            Ok(Ok(events)) => {
                debug!(count = events.len(), "calendar proxy fetched upcoming events");
                Ok(events)
            }
            Ok(Err(err)) if err.is_upstream_failure() => {
                warn!(error = %err, "calendar upstream request failed");
                Err(ProxyError::Internal)
            }
            Ok(Err(err)) => {
                error!(error = %err, "calendar source failed outside the upstream call");
                Err(ProxyError::Internal)
            }
            Err(_) => {
                let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                error!(timeout_ms, "calendar upstream request timed out");
                Err(ProxyError::Internal)
            }
        }
    }
}
