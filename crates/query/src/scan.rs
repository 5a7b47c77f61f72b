//! Event scan requests

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::ObjectSet;

/// What a backend must return for one aggregation
///
/// Backends return every event of `object_set` whose timestamp is at or after
/// `since`. Returning more is allowed; callers re-apply their own filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventScan {
    /// Object set to flatten
    pub object_set: ObjectSet,
    /// Inclusive lower time boundary
    pub since: DateTime<Utc>,
}

impl EventScan {
    /// Create a scan request
    pub fn new(object_set: ObjectSet, since: DateTime<Utc>) -> Self {
        Self { object_set, since }
    }
}
