//! In-memory backend
//!
//! Serves access records held in memory. Used by tests and by callers that
//! already have the rows at hand.

use std::sync::Arc;

use async_trait::async_trait;

use crate::backend::{QueryBackend, scan_records};
use crate::error::QueryError;
use crate::event::{AccessEvent, AccessRecord};
use crate::scan::EventScan;

/// Backend over a fixed set of access records
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    records: Arc<Vec<AccessRecord>>,
}

impl MemoryBackend {
    /// Create a backend over the given records
    pub fn new(records: Vec<AccessRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl QueryBackend for MemoryBackend {
    async fn scan(&self, scan: &EventScan) -> Result<Vec<AccessEvent>, QueryError> {
        let events = scan_records(self.records.iter(), scan);

        tracing::debug!(
            records = self.records.len(),
            events = events.len(),
            object_set = %scan.object_set,
            "scanned in-memory records"
        );

        Ok(events)
    }

    async fn health_check(&self) -> Result<(), QueryError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{AccessedObject, ObjectSet};
    use chrono::{TimeZone, Utc};

    fn record(hour: u32, user: &str) -> AccessRecord {
        AccessRecord {
            query_start_time: Utc.with_ymd_and_hms(2024, 5, 10, hour, 0, 0).unwrap(),
            user_name: user.into(),
            base_objects_accessed: vec![AccessedObject::new(1, "A_PRD_T1", "Table")],
            direct_objects_accessed: vec![
                AccessedObject::new(2, "A_PRD_V1", "View"),
                AccessedObject::new(3, "A_PRD_V2", "View"),
            ],
        }
    }

    #[tokio::test]
    async fn test_scan_applies_boundary() {
        let backend = MemoryBackend::new(vec![record(8, "X"), record(9, "Y"), record(10, "Z")]);
        let since = Utc.with_ymd_and_hms(2024, 5, 10, 9, 0, 0).unwrap();

        let events = backend
            .scan(&EventScan::new(ObjectSet::Base, since))
            .await
            .unwrap();

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.timestamp >= since));
    }

    #[tokio::test]
    async fn test_scan_object_set() {
        let backend = MemoryBackend::new(vec![record(8, "X")]);
        let since = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let direct = backend
            .scan(&EventScan::new(ObjectSet::Direct, since))
            .await
            .unwrap();

        assert_eq!(direct.len(), 2);
        assert_eq!(backend.name(), "memory");
        assert!(backend.health_check().await.is_ok());
    }
}
