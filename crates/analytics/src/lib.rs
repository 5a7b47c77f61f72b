//! Egress Analytics Engine
//!
//! Turns raw access history into stacked-area charts of data egress.
//!
//! # Overview
//!
//! This crate provides the analytics layer for egress, built on top of `egress-query`.
//! It includes:
//!
//! - **Periods**: Hourly, daily, and monthly bucketing with lookback windows
//! - **Parsers**: Environment and namespace extraction from object names
//! - **Aggregation**: Per-(category, bucket) counts under a filter
//! - **Pivot**: Dense, zero-filled tables with runtime-discovered columns
//! - **Series**: Chart specs with a default visible window
//! - **Panels**: Usage and drill-down charts, evaluated alone or as a dashboard
//! - **Query Builder**: Parameterized warehouse SQL for the same counts
//!
//! # Usage
//!
//! ```ignore
//! use egress_analytics::{AccessEngine, PeriodClass, Selection, Settings};
//!
//! let settings = Settings::from_config(&config)?;
//! let engine = AccessEngine::new(backend, Arc::new(settings));
//!
//! // Accesses per namespace over the last 31 days
//! let selection = Selection::new(PeriodClass::Daily, "PRD");
//! let usage = engine.usage(&selection).await?;
//!
//! // Accesses per table inside one namespace
//! let sales = engine.drill_down("SALES", &selection).await?;
//! ```

pub mod aggregate;
pub mod builder;
pub mod dashboard;
pub mod error;
pub mod filter;
pub mod panels;
pub mod parser;
pub mod period;
pub mod pivot;
pub mod series;
pub mod settings;
pub mod window;

#[cfg(test)]
mod filter_test;

// Re-exports for convenience
pub use aggregate::{CategoryKey, CountRow, aggregate};
pub use builder::{CountRequest, QueryBuilder, count_statement};
pub use dashboard::{Dashboard, DrillTargets};
pub use error::{AnalyticsError, Result};
pub use filter::Filter;
pub use panels::{AccessEngine, DrillDownPanel, Panel, PanelOutput, Selection, UsagePanel};
pub use parser::{CategoryParser, PatternParser};
pub use period::PeriodClass;
pub use pivot::{PivotRow, PivotTable};
pub use series::{ChartSeries, ChartSpec, default_window_start};
pub use settings::Settings;
pub use window::TimeWindow;
