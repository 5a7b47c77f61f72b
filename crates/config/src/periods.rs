//! Period class configuration
//!
//! Each period class (hourly, daily, monthly) has a lookback horizon and a
//! default visible-window offset. Keys left out of a `[periods.*]` table fall
//! back to that period's own default, not a shared one.

use serde::Deserialize;

/// Rules for one period class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodRule {
    /// Whole periods to look back before the current (in-progress) one.
    /// A query covers `lookback + 1` buckets.
    pub lookback: u32,

    /// Default visible-window start, as a negative index from the end of
    /// the bucket sequence.
    pub window_offset: i32,
}

impl PeriodRule {
    /// Create a new rule
    pub const fn new(lookback: u32, window_offset: i32) -> Self {
        Self {
            lookback,
            window_offset,
        }
    }

    /// Number of buckets covered, the current one included
    pub fn horizon(&self) -> u32 {
        self.lookback.saturating_add(1)
    }
}

/// Per-period rules
///
/// # Example
///
/// ```toml
/// [periods.hourly]
/// lookback = 72
/// window_offset = -25
///
/// [periods.daily]
/// lookback = 31
/// window_offset = -15
///
/// [periods.monthly]
/// lookback = 12
/// window_offset = -3
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "RawPeriodsConfig")]
pub struct PeriodsConfig {
    /// Hourly buckets
    pub hourly: PeriodRule,
    /// Daily buckets
    pub daily: PeriodRule,
    /// Monthly buckets
    pub monthly: PeriodRule,
}

const HOURLY: PeriodRule = PeriodRule::new(72, -25);
const DAILY: PeriodRule = PeriodRule::new(31, -15);
const MONTHLY: PeriodRule = PeriodRule::new(12, -3);

impl Default for PeriodsConfig {
    fn default() -> Self {
        Self {
            hourly: HOURLY,
            daily: DAILY,
            monthly: MONTHLY,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPeriodsConfig {
    hourly: RawPeriodRule,
    daily: RawPeriodRule,
    monthly: RawPeriodRule,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPeriodRule {
    lookback: Option<u32>,
    window_offset: Option<i32>,
}

impl RawPeriodRule {
    fn or(self, fallback: PeriodRule) -> PeriodRule {
        PeriodRule {
            lookback: self.lookback.unwrap_or(fallback.lookback),
            window_offset: self.window_offset.unwrap_or(fallback.window_offset),
        }
    }
}

impl From<RawPeriodsConfig> for PeriodsConfig {
    fn from(raw: RawPeriodsConfig) -> Self {
        Self {
            hourly: raw.hourly.or(HOURLY),
            daily: raw.daily.or(DAILY),
            monthly: raw.monthly.or(MONTHLY),
        }
    }
}
