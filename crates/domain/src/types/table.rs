//! Table view controls

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::impl_domain_label_conversions;

/// Column the table is sorted by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "snake_case"))]
pub enum SortKey {
    /// Upstream order, untouched.
    #[default]
    None,
    Title,
    Subject,
    DueDate,
    Status,
    Priority,
}

impl_domain_label_conversions!(SortKey {
    None => "none",
    Title => "title",
    Subject => "subject",
    DueDate => "due_date",
    Status => "status",
    Priority => "priority",
});

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export, rename_all = "lowercase"))]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl_domain_label_conversions!(SortDirection {
    Asc => "asc",
    Desc => "desc",
});

impl SortDirection {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_key_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&SortKey::DueDate).unwrap();
        assert_eq!(json, "\"due_date\"");
        assert_eq!("due_date".parse::<SortKey>(), Ok(SortKey::DueDate));
    }

    #[test]
    fn direction_toggles() {
        assert_eq!(SortDirection::Asc.toggled(), SortDirection::Desc);
        assert_eq!(SortDirection::Desc.toggled(), SortDirection::Asc);
        assert_eq!(SortDirection::default(), SortDirection::Asc);
    }
}
