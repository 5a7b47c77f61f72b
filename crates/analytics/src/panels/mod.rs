//! Panels and the access engine
//!
//! A panel is one chart of the dashboard:
//!
//! - **usage**: accesses per namespace for one object set
//! - **drill_down**: accesses per table inside one namespace
//!
//! Every panel runs the same pipeline: scan, aggregate, pivot, compose.

pub mod drilldown;
pub mod usage;

pub use drilldown::DrillDownPanel;
pub use usage::UsagePanel;

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use egress_query::{EventScan, ObjectSet, QueryBackend, Statement};
use serde::Serialize;

use crate::aggregate::aggregate;
use crate::builder::{CountRequest, count_statement};
use crate::error::{AnalyticsError, Result};
use crate::period::PeriodClass;
use crate::pivot::PivotTable;
use crate::series::ChartSpec;
use crate::settings::Settings;
use crate::window::TimeWindow;

/// The user's choice for one panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    /// Bucketing granularity
    pub period: PeriodClass,
    /// Selected environment
    pub environment: String,
    /// Object set to count
    pub object_set: ObjectSet,
    /// Pinned "now"; the wall clock when unset
    pub as_of: Option<DateTime<Utc>>,
}

impl Selection {
    /// Create a selection over underlying objects
    pub fn new(period: PeriodClass, environment: impl Into<String>) -> Self {
        Self {
            period,
            environment: environment.into(),
            object_set: ObjectSet::Base,
            as_of: None,
        }
    }

    /// Set the object set
    pub fn with_object_set(mut self, object_set: ObjectSet) -> Self {
        self.object_set = object_set;
        self
    }

    /// Pin "now"
    pub fn with_as_of(mut self, as_of: DateTime<Utc>) -> Self {
        self.as_of = Some(as_of);
        self
    }

    /// Resolve the lookback window for this selection
    pub fn window(&self, settings: &Settings) -> TimeWindow {
        let rule = settings.rule(self.period);
        match self.as_of {
            Some(now) => TimeWindow::resolve_at(self.period, rule, now),
            None => TimeWindow::resolve(self.period, rule),
        }
    }
}

/// Result of evaluating one panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelOutput {
    /// Panel title
    pub title: String,
    /// Dense per-bucket counts
    pub pivot: PivotTable,
    /// Chart ready for rendering
    pub chart: ChartSpec,
}

/// A chart that can be evaluated against a query backend
#[async_trait]
pub trait Panel: Send + Sync {
    /// Get the panel name for logging/identification
    fn name(&self) -> &'static str;

    /// Title shown above the chart
    fn title(&self) -> String;

    /// Selection the panel was built for
    fn selection(&self) -> &Selection;

    /// Grouped-count request for a resolved window
    fn request(&self, settings: &Settings, window: &TimeWindow) -> CountRequest;

    /// Evaluate the panel
    async fn execute(&self, backend: &dyn QueryBackend, settings: &Settings) -> Result<PanelOutput> {
        let selection = self.selection();
        settings.check_environment(&selection.environment)?;

        let window = selection.window(settings);
        let request = self.request(settings, &window);

        let start = Instant::now();
        let events = backend
            .scan(&EventScan::new(request.object_set, window.boundary))
            .await?;
        let rows = aggregate(
            &events,
            &request.filter,
            request.period,
            &request.key,
            settings.parser(),
        );
        let pivot = PivotTable::from_counts(&rows);
        let chart = ChartSpec::compose(&pivot, request.period, window.window_offset);

        tracing::debug!(
            panel = self.name(),
            backend = backend.name(),
            period = %request.period,
            environment = %selection.environment,
            object_set = %request.object_set,
            since = %window.boundary,
            events = events.len(),
            categories = pivot.categories.len(),
            buckets = pivot.rows.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "panel evaluated"
        );

        Ok(PanelOutput {
            title: self.title(),
            pivot,
            chart,
        })
    }
}

/// Access engine for evaluating panels
#[derive(Clone)]
pub struct AccessEngine {
    backend: Arc<dyn QueryBackend>,
    settings: Arc<Settings>,
}

impl AccessEngine {
    /// Create a new engine over a backend
    pub fn new(backend: Arc<dyn QueryBackend>, settings: Arc<Settings>) -> Self {
        Self { backend, settings }
    }

    /// Get a reference to the underlying query backend
    pub fn backend(&self) -> &dyn QueryBackend {
        self.backend.as_ref()
    }

    /// Get the backend name
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Settings shared by all panels
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Check that the backend can serve scans
    pub async fn health_check(&self) -> Result<()> {
        self.backend.health_check().await.map_err(|e| {
            AnalyticsError::QueryFailed(format!("{} backend unavailable: {}", self.backend.name(), e))
        })
    }

    /// Evaluate any panel
    pub async fn execute(&self, panel: &dyn Panel) -> Result<PanelOutput> {
        panel.execute(self.backend.as_ref(), &self.settings).await
    }

    /// Accesses per namespace
    pub async fn usage(&self, selection: &Selection) -> Result<PanelOutput> {
        let panel = UsagePanel::new(selection.clone());
        self.execute(&panel).await
    }

    /// Accesses per table within one namespace
    pub async fn drill_down(&self, namespace: &str, selection: &Selection) -> Result<PanelOutput> {
        let panel = DrillDownPanel::new(namespace, selection.clone());
        self.execute(&panel).await
    }

    /// Namespaces seen in the selection's window, sorted
    pub async fn namespaces(&self, selection: &Selection) -> Result<Vec<String>> {
        let output = self.usage(selection).await?;
        Ok(output.pivot.categories)
    }

    /// Warehouse SQL for a usage or drill-down panel
    pub fn explain(&self, selection: &Selection, namespace: Option<&str>) -> Result<Statement> {
        self.settings.check_environment(&selection.environment)?;
        let window = selection.window(&self.settings);

        let request = match namespace {
            Some(ns) => DrillDownPanel::new(ns, selection.clone()).request(&self.settings, &window),
            None => UsagePanel::new(selection.clone()).request(&self.settings, &window),
        };

        Ok(count_statement(&request, &self.settings.sql))
    }
}

#[cfg(test)]
mod panels_test;
