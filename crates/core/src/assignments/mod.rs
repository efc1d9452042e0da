//! Assignment derivation and tabular presentation.

pub mod table;
pub mod transform;

pub use table::{AssignmentTable, TablePage};
pub use transform::{
    days_until_due, decode_events, due_status, parse_due_instant, priority_for, resolve_due_date,
    subject_of, to_assignment, transform_events,
};
