//! Time window resolution
//!
//! Turns a period class into the lookback boundary of a query. The boundary
//! is always a whole-unit edge, so the first bucket of a result is never a
//! partial period. The current, still running bucket is included.

use chrono::{DateTime, Utc};
use egress_config::PeriodRule;

use crate::period::PeriodClass;

/// A resolved lookback window for one period class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    /// Period class the window was resolved for
    pub period: PeriodClass,
    /// Inclusive lower boundary (bucket-aligned)
    pub boundary: DateTime<Utc>,
    /// Start of the current (in-progress) bucket
    pub current: DateTime<Utc>,
    /// Default visible-window offset (negative, from the end)
    pub window_offset: i32,
}

impl TimeWindow {
    /// Resolve the window ending now
    pub fn resolve(period: PeriodClass, rule: &PeriodRule) -> Self {
        Self::resolve_at(period, rule, Utc::now())
    }

    /// Resolve the window ending at `now`
    ///
    /// `boundary = truncate(now) - lookback units`, which is
    /// `truncate(now) - (horizon - 1) units` with the current bucket counted.
    pub fn resolve_at(period: PeriodClass, rule: &PeriodRule, now: DateTime<Utc>) -> Self {
        let current = period.truncate(now);
        let boundary = period.step_back(current, rule.lookback);

        Self {
            period,
            boundary,
            current,
            window_offset: rule.window_offset,
        }
    }

    /// Bucket a timestamp falls into
    pub fn bucket_of(&self, ts: DateTime<Utc>) -> DateTime<Utc> {
        self.period.truncate(ts)
    }

    /// Whether a timestamp is inside the lookback window
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.boundary
    }
}
