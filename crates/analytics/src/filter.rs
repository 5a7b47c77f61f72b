//! Event filters
//!
//! A filter decides which access events count toward a chart: the lookback
//! boundary, the selected environment, excluded actors and object domain, and
//! for drill-downs the selected namespace.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use egress_query::AccessEvent;

use crate::parser::CategoryParser;

/// A complete filter for access event aggregation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    /// Inclusive lower time boundary
    pub since: DateTime<Utc>,
    /// Environment the object name must parse to
    pub environment: String,
    /// Actors whose accesses are ignored
    pub excluded_actors: BTreeSet<String>,
    /// Object domain that is ignored
    pub excluded_domain: Option<String>,
    /// Namespace the object name must parse to (drill-down)
    pub namespace: Option<String>,
}

impl Filter {
    /// Create a new filter for an environment
    pub fn new(since: DateTime<Utc>, environment: impl Into<String>) -> Self {
        Self {
            since,
            environment: environment.into(),
            excluded_actors: BTreeSet::new(),
            excluded_domain: None,
            namespace: None,
        }
    }

    /// Ignore accesses by an actor
    pub fn with_excluded_actor(mut self, actor: impl Into<String>) -> Self {
        self.excluded_actors.insert(actor.into());
        self
    }

    /// Ignore accesses by several actors
    pub fn with_excluded_actors<I, S>(mut self, actors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_actors
            .extend(actors.into_iter().map(Into::into));
        self
    }

    /// Ignore objects of a domain
    pub fn with_excluded_domain(mut self, domain: impl Into<String>) -> Self {
        self.excluded_domain = Some(domain.into());
        self
    }

    /// Restrict to one namespace
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Check whether an event counts under this filter
    pub fn matches(&self, event: &AccessEvent, parser: &dyn CategoryParser) -> bool {
        let object = &event.object;

        if object.object_id.is_none() || event.timestamp < self.since {
            return false;
        }

        if self
            .excluded_domain
            .as_deref()
            .is_some_and(|domain| object.object_domain == domain)
        {
            return false;
        }

        if self.excluded_actors.contains(&event.user_name) {
            return false;
        }

        if parser.environment_of(&object.object_name) != self.environment {
            return false;
        }

        match &self.namespace {
            Some(namespace) => parser.namespace_of(&object.object_name) == *namespace,
            None => true,
        }
    }
}
