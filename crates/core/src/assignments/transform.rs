//! Event-to-assignment transformation
//!
//! Pure and total: every event yields exactly one record, in input order.
//! `now` is captured once by the caller and shared by the whole batch.
//! Raw listing items are decoded leniently first; a malformed item never
//! aborts the batch.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use duedash_domain::constants::{
    DEFAULT_SUBJECT, DEFAULT_TIME_ZONE, HIGH_PRIORITY_MAX_DAYS, MEDIUM_PRIORITY_MAX_DAYS,
    MILLIS_PER_DAY,
};
use duedash_domain::{
    AssignmentPriority, AssignmentRecord, AssignmentStatus, DueDate, EventDateTime, RawEvent,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Decode raw listing items into typed events.
///
/// Items with wrongly typed fields keep whatever string fields they carry;
/// items that are not JSON objects are skipped.
pub fn decode_events(items: &[Value]) -> Vec<RawEvent> {
    items.iter().filter_map(decode_event).collect()
}

fn decode_event(item: &Value) -> Option<RawEvent> {
    if !item.is_object() {
        warn!(kind = json_kind(item), "skipping calendar item that is not an object");
        return None;
    }

    match RawEvent::deserialize(item) {
        Ok(event) => Some(event),
        Err(err) => {
            warn!(error = %err, "calendar item has malformed fields, keeping readable ones");
            Some(salvage_event(item))
        }
    }
}

fn salvage_event(item: &Value) -> RawEvent {
    let text = |value: &Value, key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);

    let end = item.get("end").map_or_else(EventDateTime::default, |end| EventDateTime {
        date: text(end, "date"),
        date_time: text(end, "dateTime"),
        time_zone: text(end, "timeZone"),
    });

    RawEvent {
        id: text(item, "id").unwrap_or_default(),
        summary: text(item, "summary"),
        description: text(item, "description"),
        start: None,
        end,
        status: text(item, "status"),
        organizer: None,
        location: text(item, "location"),
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Transform a fetched batch.
pub fn transform_events(events: &[RawEvent], now: DateTime<Utc>) -> Vec<AssignmentRecord> {
    events.iter().map(|event| to_assignment(event, now)).collect()
}

/// Transform a single event.
pub fn to_assignment(event: &RawEvent, now: DateTime<Utc>) -> AssignmentRecord {
    let due_date = resolve_due_date(&event.id, &event.end, now);

    AssignmentRecord {
        id: event.id.clone(),
        title: event.summary.clone(),
        description: event.description.clone(),
        status: due_status(due_date.instant, now),
        priority: priority_for(due_date.instant, now),
        subject: subject_of(event.description.as_deref()).to_string(),
        due_date,
    }
}

/// `end.dateTime`, else `end.date`, else `now`.
///
/// A value that does not parse keeps its text for display but is due at
/// `now`, same as a missing one.
pub fn resolve_due_date(event_id: &str, end: &EventDateTime, now: DateTime<Utc>) -> DueDate {
    let time_zone = end
        .time_zone
        .as_deref()
        .filter(|tz| !tz.is_empty())
        .unwrap_or(DEFAULT_TIME_ZONE)
        .to_string();

    let raw = end
        .date_time
        .as_deref()
        .filter(|s| !s.is_empty())
        .or_else(|| end.date.as_deref().filter(|s| !s.is_empty()));

    match raw {
        Some(raw) => {
            let instant = parse_due_instant(raw).unwrap_or_else(|| {
                warn!(event_id, value = raw, "unparseable event end, treating as due now");
                now
            });
            DueDate { date_time: raw.to_string(), time_zone, instant }
        }
        None => DueDate {
            date_time: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            time_zone,
            instant: now,
        },
    }
}

/// Parse an RFC 3339 date-time or a `YYYY-MM-DD` date (midnight UTC).
pub fn parse_due_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
}

/// `Overdue` strictly before `now`, otherwise `Pending`.
pub fn due_status(due: DateTime<Utc>, now: DateTime<Utc>) -> AssignmentStatus {
    if due < now {
        AssignmentStatus::Overdue
    } else {
        AssignmentStatus::Pending
    }
}

/// Whole days until due, rounded up.
pub fn days_until_due(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (due - now).num_milliseconds();
    let days = millis / MILLIS_PER_DAY;
    // Integer division truncates toward zero, which is already the ceiling
    // for negative values.
    if millis % MILLIS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}

/// `<= 2` days high, `3..=5` medium, beyond that low.
pub fn priority_for(due: DateTime<Utc>, now: DateTime<Utc>) -> AssignmentPriority {
    match days_until_due(due, now) {
        d if d <= HIGH_PRIORITY_MAX_DAYS => AssignmentPriority::High,
        d if d <= MEDIUM_PRIORITY_MAX_DAYS => AssignmentPriority::Medium,
        _ => AssignmentPriority::Low,
    }
}

/// First line of the description, or `"General"`.
pub fn subject_of(description: Option<&str>) -> &str {
    description
        .and_then(|text| text.split('\n').next())
        .filter(|line| !line.is_empty())
        .unwrap_or(DEFAULT_SUBJECT)
}
