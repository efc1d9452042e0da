//! Upstream calendar event types
//!
//! Mirrors the field projection requested from the calendar API
//! (`id,summary,description,start,end,status,organizer,location`). The
//! proxy passes listing items through as raw JSON; `RawEvent` is the typed
//! view the transformer reads, so every field the projection can omit is
//! optional.

use serde::{Deserialize, Serialize};
use serde_json::Value;
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

/// Calendar item as received from the upstream provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "camelCase"))]
pub struct RawEvent {
    /// Empty when the upstream item carries no id.
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<EventDateTime>,
    #[serde(default, skip_serializing_if = "EventDateTime::is_empty")]
    pub end: EventDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<EventOrganizer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Timestamp descriptor: all-day events carry `date`, timed events carry
/// `dateTime` (RFC 3339) and optionally `timeZone`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "camelCase"))]
pub struct EventDateTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventDateTime {
    /// Timed descriptor.
    pub fn at(date_time: impl Into<String>) -> Self {
        Self { date: None, date_time: Some(date_time.into()), time_zone: None }
    }

    /// All-day descriptor (`YYYY-MM-DD`).
    pub fn on(date: impl Into<String>) -> Self {
        Self { date: Some(date.into()), date_time: None, time_zone: None }
    }

    #[must_use]
    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.date_time.is_none() && self.time_zone.is_none()
    }
}

/// Event organizer as projected by the upstream API
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "camelCase"))]
pub struct EventOrganizer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub is_self: Option<bool>,
}

/// Upstream list envelope; only `items` is kept, untyped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpstreamEventList {
    /// The projection drops `items` entirely when nothing is upcoming.
    #[serde(default)]
    pub items: Vec<Value>,
}

impl RawEvent {
    /// Minimal event with an id and title, used by fixtures and tests.
    pub fn new(id: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            summary: Some(summary.into()),
            description: None,
            start: None,
            end: EventDateTime::default(),
            status: None,
            organizer: None,
            location: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_end(mut self, end: EventDateTime) -> Self {
        self.end = end;
        self
    }
}
