//! Chart series composition
//!
//! Turns a pivot table into what a stacked-area chart needs: one series per
//! category, x-axis labels, and where the initially visible window starts.
//! Series keep their zeros; stacking adds series index by index.

use serde::{Deserialize, Serialize};

use crate::period::PeriodClass;
use crate::pivot::PivotTable;

/// One category's counts, aligned with the x-axis labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Category name (legend entry)
    pub name: String,
    /// Count per bucket, zeros included
    pub values: Vec<u64>,
}

impl ChartSeries {
    /// Create a new series
    pub fn new(name: impl Into<String>, values: Vec<u64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Sum of all values
    pub fn total(&self) -> u64 {
        self.values.iter().sum()
    }
}

/// Everything the renderer receives for one chart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    /// Categories, sorted ascending
    pub categories: Vec<String>,
    /// One label per bucket
    pub x_axis_labels: Vec<String>,
    /// One series per category, in category order
    pub series: Vec<ChartSeries>,
    /// First visible label index; absent when there is nothing to show
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default_window_start_index: Option<usize>,
}

impl ChartSpec {
    /// Compose a chart from a pivot table
    pub fn compose(table: &PivotTable, period: PeriodClass, window_offset: i32) -> Self {
        let x_axis_labels: Vec<String> = table.rows.iter().map(|r| period.label(r.bucket)).collect();

        let series = table
            .categories
            .iter()
            .map(|category| ChartSeries::new(category.clone(), table.column(category)))
            .collect();

        let default_window_start_index = default_window_start(x_axis_labels.len(), window_offset);

        Self {
            categories: table.categories.clone(),
            x_axis_labels,
            series,
            default_window_start_index,
        }
    }

    /// Check if there is nothing to render
    pub fn is_empty(&self) -> bool {
        self.x_axis_labels.is_empty()
    }

    /// Series by category name
    pub fn series(&self, name: &str) -> Option<&ChartSeries> {
        self.series.iter().find(|s| s.name == name)
    }
}

/// Start index of the default visible window
///
/// `len + offset`, clamped into `[0, len]`. With no labels there is no window.
pub fn default_window_start(len: usize, offset: i32) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let start = (len as i64 + offset as i64).clamp(0, len as i64);
    Some(start as usize)
}
