//! Dynamic pivot
//!
//! Reshapes grouped counts into a dense table with one row per bucket and one
//! column per category. Categories are not known up front: they are collected
//! from the counts themselves, sorted, and every row gets every category with
//! an explicit zero where nothing was counted.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregate::CountRow;

/// One bucket of a pivot table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotRow {
    /// Bucket start
    pub bucket: DateTime<Utc>,
    /// Count for every category of the table
    pub counts: BTreeMap<String, u64>,
}

impl PivotRow {
    /// Count for a category (0 for categories outside the table)
    pub fn get(&self, category: &str) -> u64 {
        self.counts.get(category).copied().unwrap_or(0)
    }

    /// Sum across all categories
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

/// Dense, zero-filled counts by bucket and category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PivotTable {
    /// Categories, sorted ascending, no duplicates
    pub categories: Vec<String>,
    /// Rows, strictly increasing by bucket
    pub rows: Vec<PivotRow>,
}

impl PivotTable {
    /// Table with no categories and no rows
    pub fn empty() -> Self {
        Self::default()
    }

    /// Pivot grouped counts
    ///
    /// Repeated (category, bucket) pairs are summed. No input rows gives an
    /// empty table.
    pub fn from_counts(counts: &[CountRow]) -> Self {
        let categories: BTreeSet<&str> = counts.iter().map(|r| r.category.as_str()).collect();

        let zero_row: BTreeMap<String, u64> =
            categories.iter().map(|c| (c.to_string(), 0)).collect();

        let mut grid: BTreeMap<DateTime<Utc>, BTreeMap<String, u64>> = BTreeMap::new();
        for row in counts {
            let cells = grid.entry(row.bucket).or_insert_with(|| zero_row.clone());
            if let Some(cell) = cells.get_mut(&row.category) {
                *cell += row.count;
            }
        }

        let table = Self {
            categories: categories.into_iter().map(str::to_string).collect(),
            rows: grid
                .into_iter()
                .map(|(bucket, counts)| PivotRow { bucket, counts })
                .collect(),
        };

        tracing::debug!(
            categories = table.categories.len(),
            buckets = table.rows.len(),
            "built pivot table"
        );

        table
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Bucket starts in row order
    pub fn buckets(&self) -> Vec<DateTime<Utc>> {
        self.rows.iter().map(|r| r.bucket).collect()
    }

    /// One category's counts in row order
    pub fn column(&self, category: &str) -> Vec<u64> {
        self.rows.iter().map(|r| r.get(category)).collect()
    }

    /// Sum of every cell
    pub fn total(&self) -> u64 {
        self.rows.iter().map(PivotRow::total).sum()
    }
}
