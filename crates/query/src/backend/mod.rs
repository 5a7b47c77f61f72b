//! Query backend trait and implementations

pub mod local;
pub mod memory;

use async_trait::async_trait;

use crate::error::QueryError;
use crate::event::{AccessEvent, AccessRecord};
use crate::scan::EventScan;

/// Query backend trait
///
/// Implemented by the in-memory and local file backends.
#[async_trait]
pub trait QueryBackend: Send + Sync {
    /// Return the access events a scan asks for
    async fn scan(&self, scan: &EventScan) -> Result<Vec<AccessEvent>, QueryError>;

    /// Check if backend is available
    async fn health_check(&self) -> Result<(), QueryError>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Flatten the records a scan covers
pub(crate) fn scan_records<'a>(
    records: impl IntoIterator<Item = &'a AccessRecord>,
    scan: &EventScan,
) -> Vec<AccessEvent> {
    records
        .into_iter()
        .filter(|r| r.query_start_time >= scan.since)
        .flat_map(|r| r.flatten(scan.object_set))
        .collect()
}
