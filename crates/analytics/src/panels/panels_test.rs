//! Tests for panels and the access engine

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use egress_config::Config;
use egress_query::{
    AccessEvent, AccessRecord, AccessedObject, EventScan, MemoryBackend, ObjectSet, QueryBackend,
    QueryError,
};

use crate::error::AnalyticsError;
use crate::panels::{AccessEngine, Selection};
use crate::period::PeriodClass;
use crate::settings::Settings;

struct DownBackend;

#[async_trait]
impl QueryBackend for DownBackend {
    async fn scan(&self, _scan: &EventScan) -> Result<Vec<AccessEvent>, QueryError> {
        Err(QueryError::Connection("warehouse unreachable".into()))
    }

    async fn health_check(&self) -> Result<(), QueryError> {
        Err(QueryError::Connection("warehouse unreachable".into()))
    }

    fn name(&self) -> &'static str {
        "down"
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 10, 15, 0).unwrap()
}

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, hour, 5, 0).unwrap()
}

fn record(ts: DateTime<Utc>, user: &str, base: &[&str], direct: &[&str]) -> AccessRecord {
    let mut record = AccessRecord::new(ts, user);
    for (i, name) in base.iter().enumerate() {
        record = record.with_object(ObjectSet::Base, AccessedObject::new(i as u64 + 1, *name, "Table"));
    }
    for (i, name) in direct.iter().enumerate() {
        record = record.with_object(ObjectSet::Direct, AccessedObject::new(i as u64 + 100, *name, "View"));
    }
    record
}

fn engine(records: Vec<AccessRecord>) -> AccessEngine {
    let settings = Settings::from_config(&Config::default()).unwrap();
    AccessEngine::new(Arc::new(MemoryBackend::new(records)), Arc::new(settings))
}

fn selection(period: PeriodClass) -> Selection {
    Selection::new(period, "PRD").with_as_of(now())
}

#[tokio::test]
async fn test_usage_counts_namespaces() {
    let engine = engine(vec![
        record(at(10, 9), "ALICE", &["SALES_PRD_ORDERS", "HR_PRD_STAFF"], &["SALES_PRD_V"]),
        record(at(10, 9), "BOB", &["SALES_PRD_ORDERS"], &[]),
        record(at(9, 8), "ALICE", &["SALES_PRD_ITEMS"], &[]),
    ]);

    let output = engine.usage(&selection(PeriodClass::Daily)).await.unwrap();

    assert_eq!(output.title, "Underlying Data Egress");
    assert_eq!(output.pivot.categories, vec!["HR", "SALES"]);
    assert_eq!(output.chart.x_axis_labels, vec!["2024-05-09", "2024-05-10"]);
    assert_eq!(output.chart.series("SALES").unwrap().values, vec![1, 2]);
    assert_eq!(output.chart.series("HR").unwrap().values, vec![0, 1]);
    assert_eq!(output.chart.default_window_start_index, Some(0));
}

#[tokio::test]
async fn test_usage_direct_set() {
    let engine = engine(vec![record(
        at(10, 9),
        "ALICE",
        &["SALES_PRD_ORDERS"],
        &["MART_PRD_REPORT"],
    )]);
    let selection = selection(PeriodClass::Daily).with_object_set(ObjectSet::Direct);

    let output = engine.usage(&selection).await.unwrap();

    assert_eq!(output.title, "Direct Data Egress");
    assert_eq!(output.pivot.categories, vec!["MART"]);
}

#[tokio::test]
async fn test_usage_applies_exclusions() {
    let staged = record(at(10, 9), "ALICE", &[], &[])
        .with_object(ObjectSet::Base, AccessedObject::new(7, "SALES_PRD_LOAD", "Stage"));
    let mut dangling = record(at(10, 9), "ALICE", &[], &[]);
    dangling.base_objects_accessed.push(AccessedObject {
        object_id: None,
        object_name: "SALES_PRD_GONE".into(),
        object_domain: "Table".into(),
    });

    let engine = engine(vec![
        record(at(10, 9), "SYSTEM", &["SALES_PRD_ORDERS"], &[]),
        record(at(10, 9), "ALICE", &["SALES_TST_ORDERS"], &[]),
        record(at(1, 0), "ALICE", &["SALES_PRD_ORDERS"], &[]),
        staged,
        dangling,
    ]);

    let output = engine.usage(&selection(PeriodClass::Hourly)).await.unwrap();

    assert!(output.pivot.is_empty());
    assert!(output.chart.is_empty());
    assert_eq!(output.chart.default_window_start_index, None);
}

#[tokio::test]
async fn test_drill_down_strips_prefix() {
    let engine = engine(vec![
        record(at(10, 9), "ALICE", &["A_PRD_ORDERS", "A_PRD_ITEMS", "B_PRD_ORDERS"], &[]),
        record(at(10, 10), "BOB", &["A_PRD_ORDERS"], &[]),
    ]);

    let output = engine
        .drill_down("A", &selection(PeriodClass::Hourly))
        .await
        .unwrap();

    assert_eq!(output.title, "A Underlying Data Egress");
    assert_eq!(output.pivot.categories, vec!["ITEMS", "ORDERS"]);
    assert_eq!(output.chart.x_axis_labels, vec!["2024-05-10 09:00", "2024-05-10 10:00"]);
    assert_eq!(output.chart.series("ORDERS").unwrap().values, vec![1, 1]);
    assert_eq!(output.chart.series("ITEMS").unwrap().values, vec![1, 0]);
}

#[tokio::test]
async fn test_namespaces() {
    let engine = engine(vec![record(
        at(10, 9),
        "ALICE",
        &["ZETA_PRD_T", "ALPHA_PRD_T", "odd.name"],
        &[],
    )]);

    let namespaces = engine.namespaces(&selection(PeriodClass::Monthly)).await.unwrap();

    // odd names parse to no environment and are filtered out
    assert_eq!(namespaces, vec!["ALPHA", "ZETA"]);
}

#[tokio::test]
async fn test_invalid_environment_rejected() {
    let engine = engine(Vec::new());
    let selection = Selection::new(PeriodClass::Daily, "QA");

    let result = engine.usage(&selection).await;

    assert!(matches!(result, Err(AnalyticsError::InvalidEnvironment(e)) if e == "QA"));
    assert!(matches!(
        engine.explain(&selection, None),
        Err(AnalyticsError::InvalidEnvironment(_))
    ));
}

#[tokio::test]
async fn test_backend_failure_propagates() {
    let settings = Settings::from_config(&Config::default()).unwrap();
    let engine = AccessEngine::new(Arc::new(DownBackend), Arc::new(settings));

    let result = engine.usage(&selection(PeriodClass::Daily)).await;
    assert!(matches!(
        result,
        Err(AnalyticsError::Backend(QueryError::Connection(_)))
    ));

    let health = engine.health_check().await;
    assert!(matches!(health, Err(AnalyticsError::QueryFailed(msg)) if msg.contains("down")));
}

#[test]
fn test_explain() {
    let engine = engine(Vec::new());

    let usage = engine.explain(&selection(PeriodClass::Daily), None).unwrap();
    let drill = engine.explain(&selection(PeriodClass::Daily), Some("A")).unwrap();

    assert!(usage.sql.contains("AS category"));
    assert_eq!(usage.placeholder_count(), usage.params.len());
    assert!(drill.sql.contains("REPLACE("));
    assert_eq!(drill.placeholder_count(), drill.params.len());
}
