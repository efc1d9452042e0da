//! Dashboard service - core business logic

use std::sync::Arc;

use duedash_domain::{AssignmentRecord, UserSession};
use tracing::{info, warn};

use crate::assignments::{decode_events, transform_events, AssignmentTable};
use crate::calendar::CalendarProxy;
use crate::clock::Clock;

/// Loads assignment records for a dashboard session
///
/// A failed fetch never surfaces as an error here: the dashboard renders an
/// empty table and the cause goes to the log.
pub struct DashboardService {
    proxy: Arc<CalendarProxy>,
    clock: Arc<dyn Clock>,
}

impl DashboardService {
    pub fn new(proxy: Arc<CalendarProxy>, clock: Arc<dyn Clock>) -> Self {
        Self { proxy, clock }
    }

    pub fn proxy(&self) -> &Arc<CalendarProxy> {
        &self.proxy
    }

    /// One fetch cycle. `now` is read once after the fetch and shared by
    /// every record of the batch.
    pub async fn load_records(&self, session: Option<&UserSession>) -> Vec<AssignmentRecord> {
        match self.proxy.fetch_upcoming(session).await {
            Ok(items) => {
                let records = transform_events(&decode_events(&items), self.clock.now());
                info!(count = records.len(), "loaded assignments");
                records
            }
            Err(err) => {
                warn!(error = %err, "assignment fetch failed, showing empty table");
                Vec::new()
            }
        }
    }

    /// Fresh table on page 1 with default view state.
    pub async fn open_table(&self, session: Option<&UserSession>) -> AssignmentTable {
        AssignmentTable::new(self.load_records(session).await)
    }
}
