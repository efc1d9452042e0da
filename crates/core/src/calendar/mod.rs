//! Upstream calendar access: the event-source port and the authenticated
//! proxy built on it.

pub mod ports;
pub mod proxy;

pub use ports::{CalendarEventSource, UpcomingEventsQuery};
pub use proxy::{CalendarProxy, ErrorBody, EventsBody, ProxyError};
