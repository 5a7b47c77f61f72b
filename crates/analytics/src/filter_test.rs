//! Tests for event filters

use chrono::{DateTime, TimeZone, Utc};
use egress_config::ParserConfig;
use egress_query::{AccessEvent, AccessedObject};

use crate::filter::Filter;
use crate::parser::PatternParser;

fn parser() -> PatternParser {
    PatternParser::from_config(&ParserConfig::default()).unwrap()
}

fn since() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 7, 10, 0, 0).unwrap()
}

fn event(user: &str, name: &str, domain: &str) -> AccessEvent {
    AccessEvent::new(
        Utc.with_ymd_and_hms(2024, 5, 8, 12, 30, 0).unwrap(),
        user,
        AccessedObject::new(1, name, domain),
    )
}

fn base_filter() -> Filter {
    Filter::new(since(), "PRD")
        .with_excluded_actor("SYSTEM")
        .with_excluded_domain("Stage")
}

#[test]
fn test_matching_event() {
    assert!(base_filter().matches(&event("ALICE", "SALES_PRD_ORDERS", "Table"), &parser()));
}

#[test]
fn test_before_boundary() {
    let mut e = event("ALICE", "SALES_PRD_ORDERS", "Table");
    e.timestamp = since() - chrono::Duration::seconds(1);
    assert!(!base_filter().matches(&e, &parser()));

    e.timestamp = since();
    assert!(base_filter().matches(&e, &parser()));
}

#[test]
fn test_missing_object_id() {
    let mut e = event("ALICE", "SALES_PRD_ORDERS", "Table");
    e.object.object_id = None;
    assert!(!base_filter().matches(&e, &parser()));
}

#[test]
fn test_excluded_domain() {
    assert!(!base_filter().matches(&event("ALICE", "SALES_PRD_LOAD", "Stage"), &parser()));
}

#[test]
fn test_excluded_actor_is_exact() {
    assert!(!base_filter().matches(&event("SYSTEM", "SALES_PRD_ORDERS", "Table"), &parser()));
    assert!(base_filter().matches(&event("system", "SALES_PRD_ORDERS", "Table"), &parser()));
}

#[test]
fn test_several_excluded_actors() {
    let filter = Filter::new(since(), "PRD").with_excluded_actors(["SYSTEM", "ETL"]);
    assert!(!filter.matches(&event("ETL", "SALES_PRD_ORDERS", "Table"), &parser()));
    assert_eq!(filter.excluded_actors.len(), 2);
}

#[test]
fn test_environment_must_match() {
    assert!(!base_filter().matches(&event("ALICE", "SALES_DEV_ORDERS", "Table"), &parser()));
    assert!(!base_filter().matches(&event("ALICE", "ORDERS", "Table"), &parser()));
}

#[test]
fn test_namespace_restriction() {
    let filter = base_filter().with_namespace("SALES");
    assert!(filter.matches(&event("ALICE", "SALES_PRD_ORDERS", "Table"), &parser()));
    assert!(!filter.matches(&event("ALICE", "HR_PRD_PEOPLE", "Table"), &parser()));
}

#[test]
fn test_no_domain_exclusion_by_default() {
    let filter = Filter::new(since(), "PRD");
    assert!(filter.matches(&event("SYSTEM", "SALES_PRD_LOAD", "Stage"), &parser()));
}
