//! Port interfaces for the upstream calendar
//!
//! These traits define the boundary between core business logic and the
//! HTTP adapter that talks to the calendar provider.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use duedash_domain::constants::{UPSTREAM_FIELD_PROJECTION, UPSTREAM_MAX_RESULTS, UPSTREAM_ORDER_BY};
use duedash_domain::Result;
use serde_json::Value;

/// Fixed query sent with every upcoming-events listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpcomingEventsQuery {
    pub time_min: DateTime<Utc>,
    pub max_results: u32,
    /// Expand recurring events into single instances.
    pub single_events: bool,
    pub order_by: String,
    pub fields: String,
}

impl UpcomingEventsQuery {
    /// Query for events starting at `now`.
    pub fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            time_min: now,
            max_results: UPSTREAM_MAX_RESULTS,
            single_events: true,
            order_by: UPSTREAM_ORDER_BY.to_string(),
            fields: UPSTREAM_FIELD_PROJECTION.to_string(),
        }
    }

    /// Query-string pairs in the provider's parameter names.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("timeMin", self.time_min.to_rfc3339_opts(SecondsFormat::Millis, true)),
            ("maxResults", self.max_results.to_string()),
            ("singleEvents", self.single_events.to_string()),
            ("orderBy", self.order_by.clone()),
            ("fields", self.fields.clone()),
        ]
    }
}

/// Source of upcoming calendar events
#[async_trait]
pub trait CalendarEventSource: Send + Sync {
    /// List upcoming events with a bearer token. One attempt, no retry.
    ///
    /// Items are returned exactly as the provider sent them.
    async fn list_upcoming(
        &self,
        access_token: &str,
        query: &UpcomingEventsQuery,
    ) -> Result<Vec<Value>>;
}
