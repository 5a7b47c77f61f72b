//! Access history data model
//!
//! An [`AccessRecord`] is one row of the warehouse access history: a query,
//! who ran it, and the objects it touched. Each record lists two object sets,
//! the base (underlying) objects and the direct objects. Aggregation works on
//! [`AccessEvent`]s, one per accessed object of the chosen set.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One object referenced by a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessedObject {
    /// Warehouse object id (absent for objects that no longer resolve)
    #[serde(default)]
    pub object_id: Option<u64>,
    /// Fully qualified object name
    pub object_name: String,
    /// Object kind (Table, View, Stage, ...)
    pub object_domain: String,
}

impl AccessedObject {
    /// Create a resolved object
    pub fn new(
        object_id: u64,
        object_name: impl Into<String>,
        object_domain: impl Into<String>,
    ) -> Self {
        Self {
            object_id: Some(object_id),
            object_name: object_name.into(),
            object_domain: object_domain.into(),
        }
    }
}

/// One access history row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRecord {
    /// When the query started
    pub query_start_time: DateTime<Utc>,
    /// Actor that ran the query
    pub user_name: String,
    /// Objects ultimately read (views resolved to their tables)
    #[serde(default)]
    pub base_objects_accessed: Vec<AccessedObject>,
    /// Objects named directly in the query
    #[serde(default)]
    pub direct_objects_accessed: Vec<AccessedObject>,
}

impl AccessRecord {
    /// Create a record with no accessed objects
    pub fn new(query_start_time: DateTime<Utc>, user_name: impl Into<String>) -> Self {
        Self {
            query_start_time,
            user_name: user_name.into(),
            base_objects_accessed: Vec::new(),
            direct_objects_accessed: Vec::new(),
        }
    }

    /// Add an object to one of the sets
    pub fn with_object(mut self, set: ObjectSet, object: AccessedObject) -> Self {
        match set {
            ObjectSet::Base => self.base_objects_accessed.push(object),
            ObjectSet::Direct => self.direct_objects_accessed.push(object),
        }
        self
    }

    /// Objects of the given set
    pub fn objects(&self, set: ObjectSet) -> &[AccessedObject] {
        match set {
            ObjectSet::Base => &self.base_objects_accessed,
            ObjectSet::Direct => &self.direct_objects_accessed,
        }
    }

    /// One event per object of the given set
    pub fn flatten(&self, set: ObjectSet) -> impl Iterator<Item = AccessEvent> + '_ {
        self.objects(set).iter().map(move |object| AccessEvent {
            timestamp: self.query_start_time,
            user_name: self.user_name.clone(),
            object: object.clone(),
        })
    }
}

/// A single object access
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessEvent {
    /// Query start time
    pub timestamp: DateTime<Utc>,
    /// Actor that ran the query
    pub user_name: String,
    /// The object accessed
    pub object: AccessedObject,
}

impl AccessEvent {
    /// Create a new event
    pub fn new(timestamp: DateTime<Utc>, user_name: impl Into<String>, object: AccessedObject) -> Self {
        Self {
            timestamp,
            user_name: user_name.into(),
            object,
        }
    }
}

/// Which object set of an access record is counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectSet {
    /// Underlying objects (`base_objects_accessed`)
    #[default]
    Base,
    /// Directly referenced objects (`direct_objects_accessed`)
    Direct,
}

impl ObjectSet {
    /// Both sets, underlying first
    pub const ALL: [ObjectSet; 2] = [ObjectSet::Base, ObjectSet::Direct];

    /// Warehouse column holding this set
    pub fn column(&self) -> &'static str {
        match self {
            Self::Base => "base_objects_accessed",
            Self::Direct => "direct_objects_accessed",
        }
    }

    /// Human label used in panel titles
    pub fn label(&self) -> &'static str {
        match self {
            Self::Base => "Underlying",
            Self::Direct => "Direct",
        }
    }
}

/// Name that is not an object set
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown object set '{0}': expected base, underlying or direct")]
pub struct ParseObjectSetError(pub String);

impl FromStr for ObjectSet {
    type Err = ParseObjectSetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "base" | "underlying" => Ok(Self::Base),
            "direct" => Ok(Self::Direct),
            _ => Err(ParseObjectSetError(s.to_string())),
        }
    }
}

impl fmt::Display for ObjectSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base => write!(f, "base"),
            Self::Direct => write!(f, "direct"),
        }
    }
}
