use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use duedash_core::calendar::{CalendarEventSource, UpcomingEventsQuery};
use duedash_domain::{DueDashError, RawEvent, Result as DomainResult};
use serde_json::Value;

/// In-memory mock for `CalendarEventSource`.
///
/// Returns a scripted response and records every call, so tests can assert
/// both what the proxy forwarded and whether it called upstream at all.
#[derive(Clone)]
pub struct MockCalendarEventSource {
    response: Arc<Mutex<DomainResult<Vec<Value>>>>,
    delay: Option<Duration>,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<(String, UpcomingEventsQuery)>>>,
}

impl MockCalendarEventSource {
    /// Mock that answers every call with `events`, serialized as the
    /// provider would send them.
    pub fn with_events(events: Vec<RawEvent>) -> Self {
        Self::with_items(as_items(&events))
    }

    /// Mock that answers every call with raw listing items.
    pub fn with_items(items: Vec<Value>) -> Self {
        Self {
            response: Arc::new(Mutex::new(Ok(items))),
            delay: None,
            calls: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Mock that fails every call with `error`.
    pub fn failing(error: DueDashError) -> Self {
        let mock = Self::with_events(Vec::new());
        *mock.response.lock().unwrap() = Err(error);
        mock
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replace the scripted events for subsequent calls.
    pub fn set_events(&self, events: Vec<RawEvent>) {
        *self.response.lock().unwrap() = Ok(as_items(&events));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_call(&self) -> Option<(String, UpcomingEventsQuery)> {
        self.seen.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CalendarEventSource for MockCalendarEventSource {
    async fn list_upcoming(
        &self,
        access_token: &str,
        query: &UpcomingEventsQuery,
    ) -> DomainResult<Vec<Value>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push((access_token.to_string(), query.clone()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.response.lock().unwrap().clone()
    }
}

/// Events as raw listing items.
pub fn as_items(events: &[RawEvent]) -> Vec<Value> {
    events.iter().map(|event| serde_json::to_value(event).unwrap()).collect()
}
