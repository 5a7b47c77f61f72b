//! Tests for the local file backend

use super::*;
use crate::event::ObjectSet;
use chrono::{TimeZone, Utc};
use std::fs;
use tempfile::tempdir;

// =============================================================================
// Test Helpers
// =============================================================================

const LINE_A: &str = r#"{"query_start_time":"2024-05-10T10:15:00Z","user_name":"ALICE","base_objects_accessed":[{"objectId":1,"objectName":"SALES_PRD_ORDERS","objectDomain":"Table"}],"direct_objects_accessed":[{"objectId":2,"objectName":"SALES_PRD_V_ORDERS","objectDomain":"View"}]}"#;
const LINE_B: &str = r#"{"query_start_time":"2024-05-09T08:00:00Z","user_name":"BOB","base_objects_accessed":[{"objectId":3,"objectName":"HR_PRD_PEOPLE","objectDomain":"Table"},{"objectId":4,"objectName":"HR_PRD_ROLES","objectDomain":"Table"}]}"#;

fn since(day: u32) -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, 0, 0, 0).unwrap()
}

// =============================================================================
// Discovery
// =============================================================================

#[tokio::test]
async fn test_empty_dir_has_no_data_files() {
    let dir = tempdir().unwrap();
    let backend = LocalBackend::new(dir.path());

    let err = backend
        .scan(&EventScan::new(ObjectSet::Base, since(1)))
        .await
        .unwrap_err();

    assert!(matches!(err, QueryError::NoDataFiles(_)));
    assert!(backend.health_check().await.is_err());
}

#[tokio::test]
async fn test_discovers_nested_files() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("2024-05-10");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join("a.jsonl"), format!("{}\n", LINE_A)).unwrap();
    fs::write(dir.path().join("b.ndjson"), format!("{}\n", LINE_B)).unwrap();
    fs::write(dir.path().join("ignored.csv"), "not,json\n").unwrap();

    let backend = LocalBackend::new(dir.path());
    assert!(backend.health_check().await.is_ok());

    let events = backend
        .scan(&EventScan::new(ObjectSet::Base, since(1)))
        .await
        .unwrap();

    assert_eq!(events.len(), 3);
}

// =============================================================================
// Scanning
// =============================================================================

#[tokio::test]
async fn test_scan_boundary_and_object_set() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("history.jsonl"),
        format!("{}\n{}\n", LINE_A, LINE_B),
    )
    .unwrap();
    let backend = LocalBackend::new(dir.path());

    let base = backend
        .scan(&EventScan::new(ObjectSet::Base, since(10)))
        .await
        .unwrap();
    assert_eq!(base.len(), 1);
    assert_eq!(base[0].object.object_name, "SALES_PRD_ORDERS");

    let direct = backend
        .scan(&EventScan::new(ObjectSet::Direct, since(1)))
        .await
        .unwrap();
    assert_eq!(direct.len(), 1);
    assert_eq!(direct[0].user_name, "ALICE");
}

#[tokio::test]
async fn test_malformed_lines_are_skipped() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("history.jsonl"),
        format!("{}\n{{not json\n\n{}\n", LINE_A, LINE_B),
    )
    .unwrap();
    let backend = LocalBackend::new(dir.path());

    let events = backend
        .scan(&EventScan::new(ObjectSet::Base, since(1)))
        .await
        .unwrap();

    assert_eq!(events.len(), 3);
}

#[tokio::test]
async fn test_invalid_utf8_line_is_skipped() {
    let dir = tempdir().unwrap();
    let mut contents = Vec::new();
    contents.extend_from_slice(LINE_A.as_bytes());
    contents.extend_from_slice(b"\n{\"user_name\":\"\xff\xfe\"}\r\n");
    contents.extend_from_slice(LINE_B.as_bytes());
    contents.extend_from_slice(b"\r\n");
    fs::write(dir.path().join("history.jsonl"), &contents).unwrap();
    let backend = LocalBackend::new(dir.path());

    let events = backend
        .scan(&EventScan::new(ObjectSet::Base, since(1)))
        .await
        .unwrap();

    assert_eq!(events.len(), 3);
}

#[test]
fn test_parse_lines_counts_invalid_utf8_as_skipped() {
    let mut records = Vec::new();
    let mut contents = b"\xc3\x28 not utf-8\n".to_vec();
    contents.extend_from_slice(LINE_B.as_bytes());

    let skipped = parse_lines(Path::new("mem.jsonl"), &contents, &mut records);

    assert_eq!(skipped, 1);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].user_name, "BOB");
}

#[test]
fn test_parse_lines_counts_skips() {
    let mut records = Vec::new();
    let skipped = parse_lines(
        Path::new("mem.jsonl"),
        format!("{}\ngarbage\n   \n{}", LINE_A, LINE_B).as_bytes(),
        &mut records,
    );

    assert_eq!(skipped, 1);
    assert_eq!(records.len(), 2);
}

#[test]
fn test_backend_name() {
    assert_eq!(LocalBackend::new("data").name(), "local");
    assert_eq!(LocalBackend::new("data").base_path(), Path::new("data"));
}
