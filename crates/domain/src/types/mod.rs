//! Domain types and models

pub mod assignment;
pub mod event;
pub mod session;
pub mod table;

pub use assignment::{AssignmentPriority, AssignmentRecord, AssignmentStatus, DueDate};
pub use event::{EventDateTime, EventOrganizer, RawEvent, UpstreamEventList};
pub use session::UserSession;
pub use table::{SortDirection, SortKey};
