//! Event aggregation
//!
//! Groups filtered access events into counts per (category, bucket). Only
//! combinations that actually occur produce a row; zero filling happens in
//! the pivot step.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use egress_query::AccessEvent;
use serde::{Deserialize, Serialize};

use crate::filter::Filter;
use crate::parser::CategoryParser;
use crate::period::PeriodClass;

/// How an event's category is derived from its object name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryKey {
    /// Top level: the object's namespace
    Namespace,
    /// Drill-down: the table name inside one namespace
    TableName {
        /// Namespace being drilled into
        namespace: String,
        /// Selected environment
        environment: String,
    },
}

impl CategoryKey {
    /// Table names within `namespace` for `environment`
    pub fn table_name(namespace: impl Into<String>, environment: impl Into<String>) -> Self {
        Self::TableName {
            namespace: namespace.into(),
            environment: environment.into(),
        }
    }

    /// Category of an object name
    pub fn category_of(&self, object_name: &str, parser: &dyn CategoryParser) -> String {
        match self {
            Self::Namespace => parser.namespace_of(object_name),
            Self::TableName {
                namespace,
                environment,
            } => parser.strip_prefix(object_name, namespace, environment),
        }
    }
}

/// Count of matching events for one category in one bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRow {
    /// Category (namespace or table name)
    pub category: String,
    /// Bucket start
    pub bucket: DateTime<Utc>,
    /// Number of matching events
    pub count: u64,
}

impl CountRow {
    /// Create a new row
    pub fn new(category: impl Into<String>, bucket: DateTime<Utc>, count: u64) -> Self {
        Self {
            category: category.into(),
            bucket,
            count,
        }
    }
}

/// Aggregate events into per-(category, bucket) counts
///
/// Rows come back ordered by bucket, then category. Names that do not parse
/// are counted under the parser's sentinel category.
pub fn aggregate<'a>(
    events: impl IntoIterator<Item = &'a AccessEvent>,
    filter: &Filter,
    period: PeriodClass,
    key: &CategoryKey,
    parser: &dyn CategoryParser,
) -> Vec<CountRow> {
    let mut counts: BTreeMap<(DateTime<Utc>, String), u64> = BTreeMap::new();
    let mut seen = 0usize;
    let mut matched = 0usize;
    let mut anomalies = 0usize;

    for event in events {
        seen += 1;
        if !filter.matches(event, parser) {
            continue;
        }
        matched += 1;

        let category = key.category_of(&event.object.object_name, parser);
        if category == parser.sentinel() {
            anomalies += 1;
        }

        let bucket = period.truncate(event.timestamp);
        *counts.entry((bucket, category)).or_insert(0) += 1;
    }

    tracing::debug!(
        period = %period,
        events = seen,
        matched = matched,
        anomalies = anomalies,
        rows = counts.len(),
        "aggregated access events"
    );

    counts
        .into_iter()
        .map(|((bucket, category), count)| CountRow {
            category,
            bucket,
            count,
        })
        .collect()
}
