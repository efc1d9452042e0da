//! # DueDash Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The calendar event-source port and the authenticated proxy
//! - Event-to-assignment derivation rules
//! - The table engine (sort, filter, paginate)
//!
//! ## Architecture Principles
//! - Only depends on `duedash-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Time is read through [`clock::Clock`]

pub mod assignments;
pub mod calendar;
pub mod clock;
pub mod dashboard;

pub use assignments::{AssignmentTable, TablePage};
pub use calendar::{CalendarEventSource, CalendarProxy, ProxyError, UpcomingEventsQuery};
pub use clock::{Clock, FixedClock, SystemClock};
pub use dashboard::DashboardService;
