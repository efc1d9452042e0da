//! Assignment records derived from calendar events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::impl_domain_label_conversions;

/// Normalized record displayed in the assignments table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "camelCase"))]
pub struct AssignmentRecord {
    pub id: String,
    /// Absent when the upstream event has no summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub due_date: DueDate,
    pub status: AssignmentStatus,
    pub priority: AssignmentPriority,
    pub subject: String,
}

/// Resolved due timestamp
///
/// `date_time` keeps the upstream string for display; `instant` is what
/// comparisons use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "camelCase"))]
pub struct DueDate {
    pub date_time: String,
    pub time_zone: String,
    pub instant: DateTime<Utc>,
}

/// Assignment status
///
/// Variants are declared in ascending sort order. `Completed` is
/// representable but no derivation rule produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "lowercase"))]
pub enum AssignmentStatus {
    Overdue,
    Pending,
    Completed,
}

impl_domain_label_conversions!(AssignmentStatus {
    Overdue => "overdue",
    Pending => "pending",
    Completed => "completed",
});

/// Assignment priority
///
/// Variants are declared in ascending sort order: most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "lowercase"))]
pub enum AssignmentPriority {
    High,
    Medium,
    Low,
}

impl_domain_label_conversions!(AssignmentPriority {
    High => "high",
    Medium => "medium",
    Low => "low",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_orders_by_urgency_not_label() {
        assert!(AssignmentPriority::High < AssignmentPriority::Medium);
        assert!(AssignmentPriority::Medium < AssignmentPriority::Low);
        // Lexical order would put "low" before "medium".
        assert!("low" < "medium");
    }

    #[test]
    fn status_orders_overdue_first() {
        assert!(AssignmentStatus::Overdue < AssignmentStatus::Pending);
        assert!(AssignmentStatus::Pending < AssignmentStatus::Completed);
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = AssignmentRecord {
            id: "1".into(),
            title: Some("Essay".into()),
            description: None,
            due_date: DueDate {
                date_time: "2026-10-20T10:00:00Z".into(),
                time_zone: "UTC".into(),
                instant: "2026-10-20T10:00:00Z".parse().unwrap(),
            },
            status: AssignmentStatus::Pending,
            priority: AssignmentPriority::High,
            subject: "General".into(),
        };

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["dueDate"]["dateTime"], "2026-10-20T10:00:00Z");
        assert_eq!(json["dueDate"]["timeZone"], "UTC");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["priority"], "high");
        assert!(json.get("description").is_none());
    }
}
