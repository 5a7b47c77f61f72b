//! Period classes
//!
//! A period class is the bucketing granularity of a chart. It decides how
//! timestamps are truncated, how far back a query looks, how x-axis labels
//! read, and where the initially visible window starts.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use egress_config::{PeriodRule, PeriodsConfig};
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};

/// Time granularity for aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodClass {
    /// Per hour
    Hourly,
    /// Per day
    Daily,
    /// Per calendar month
    Monthly,
}

impl PeriodClass {
    /// All period classes, finest first
    pub const ALL: [PeriodClass; 3] = [Self::Hourly, Self::Daily, Self::Monthly];

    /// Parse period class from string
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hourly" | "hour" | "1h" => Ok(Self::Hourly),
            "daily" | "day" | "1d" => Ok(Self::Daily),
            "monthly" | "month" => Ok(Self::Monthly),
            _ => Err(AnalyticsError::InvalidPeriod(s.to_string())),
        }
    }

    /// Configured rule for this period class
    pub fn rule<'a>(&self, periods: &'a PeriodsConfig) -> &'a PeriodRule {
        match self {
            Self::Hourly => &periods.hourly,
            Self::Daily => &periods.daily,
            Self::Monthly => &periods.monthly,
        }
    }

    /// Truncate a timestamp to the start of its bucket
    pub fn truncate(&self, ts: DateTime<Utc>) -> DateTime<Utc> {
        match self {
            Self::Hourly => ts
                .date_naive()
                .and_hms_opt(ts.hour(), 0, 0)
                .map(|t| t.and_utc())
                .unwrap_or(ts),
            Self::Daily => start_of_day(ts.date_naive()).unwrap_or(ts),
            Self::Monthly => ts
                .date_naive()
                .with_day(1)
                .and_then(start_of_day)
                .unwrap_or(ts),
        }
    }

    /// Move a bucket start back by `units` whole periods
    ///
    /// Monthly steps follow the calendar, so the result stays on a month edge.
    /// Steps past the start of the representable calendar clamp to
    /// `DateTime::<Utc>::MIN_UTC`.
    pub fn step_back(&self, bucket: DateTime<Utc>, units: u32) -> DateTime<Utc> {
        self.checked_step_back(bucket, units)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Like [`step_back`](Self::step_back), `None` when the result is out of range
    pub fn checked_step_back(&self, bucket: DateTime<Utc>, units: u32) -> Option<DateTime<Utc>> {
        match self {
            Self::Hourly => bucket.checked_sub_signed(Duration::try_hours(i64::from(units))?),
            Self::Daily => bucket.checked_sub_signed(Duration::try_days(i64::from(units))?),
            Self::Monthly => {
                let months =
                    i64::from(bucket.year()) * 12 + i64::from(bucket.month0()) - i64::from(units);
                let year = i32::try_from(months.div_euclid(12)).ok()?;
                let month = months.rem_euclid(12) as u32 + 1;
                NaiveDate::from_ymd_opt(year, month, 1).and_then(start_of_day)
            }
        }
    }

    /// X-axis label for a bucket
    pub fn label(&self, bucket: DateTime<Utc>) -> String {
        match self {
            Self::Hourly => bucket.format("%Y-%m-%d %H:00").to_string(),
            Self::Daily => bucket.format("%Y-%m-%d").to_string(),
            Self::Monthly => bucket.format("%Y-%m").to_string(),
        }
    }

    /// Warehouse `DATE_TRUNC` unit
    pub fn sql_unit(&self) -> &'static str {
        match self {
            Self::Hourly => "HOUR",
            Self::Daily => "DAY",
            Self::Monthly => "MONTH",
        }
    }

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "Hourly",
            Self::Daily => "Daily",
            Self::Monthly => "Monthly",
        }
    }
}

impl FromStr for PeriodClass {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for PeriodClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn start_of_day(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|t| t.and_utc())
}
