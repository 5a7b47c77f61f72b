//! Query builder for warehouse SQL
//!
//! Renders the grouped-count query as parameterized SQL against the access
//! history view. Every filter value is bound through a `?` placeholder:
//! - Lookback boundary
//! - Excluded object domain
//! - Environment and namespace
//! - Excluded actors
//! - Table-name prefix

use egress_config::SqlConfig;
use egress_query::{ObjectSet, Param, Statement};

use crate::aggregate::CategoryKey;
use crate::filter::Filter;
use crate::period::PeriodClass;

/// Object name of a flattened access entry
const OBJECT_NAME: &str = "f1.value:\"objectName\"::string";
/// Object id of a flattened access entry
const OBJECT_ID: &str = "f1.value:\"objectId\"";
/// Object domain of a flattened access entry
const OBJECT_DOMAIN: &str = "f1.value:\"objectDomain\"::string";

/// Query builder for parameterized SQL
///
/// Parameters are kept per clause so their order always matches the order of
/// placeholders in the rendered text.
pub struct QueryBuilder {
    table: String,
    flatten: Vec<String>,
    select: Vec<String>,
    select_params: Vec<Param>,
    where_clauses: Vec<String>,
    where_params: Vec<Param>,
    group_by: Vec<String>,
    order_by: Vec<String>,
}

impl QueryBuilder {
    /// Create a new query builder for a table
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            flatten: Vec::new(),
            select: Vec::new(),
            select_params: Vec::new(),
            where_clauses: Vec::new(),
            where_params: Vec::new(),
            group_by: Vec::new(),
            order_by: Vec::new(),
        }
    }

    /// Join the elements of an array column
    pub fn lateral_flatten(mut self, column: &str, alias: &str) -> Self {
        self.flatten
            .push(format!("LATERAL FLATTEN({}) {}", column, alias));
        self
    }

    /// Add a SELECT column
    pub fn select(mut self, column: impl Into<String>) -> Self {
        self.select.push(column.into());
        self
    }

    /// Add a SELECT column with alias
    pub fn select_as(mut self, expr: impl Into<String>, alias: impl Into<String>) -> Self {
        self.select.push(format!("{} AS {}", expr.into(), alias.into()));
        self
    }

    /// Add a SELECT expression holding one placeholder
    pub fn select_bind(
        mut self,
        expr: impl Into<String>,
        alias: impl Into<String>,
        param: impl Into<Param>,
    ) -> Self {
        self.select.push(format!("{} AS {}", expr.into(), alias.into()));
        self.select_params.push(param.into());
        self
    }

    /// Add a WHERE clause without parameters
    pub fn where_clause(mut self, clause: impl Into<String>) -> Self {
        self.where_clauses.push(clause.into());
        self
    }

    /// Add a WHERE clause holding one placeholder
    pub fn where_bind(mut self, clause: impl Into<String>, param: impl Into<Param>) -> Self {
        self.where_clauses.push(clause.into());
        self.where_params.push(param.into());
        self
    }

    /// Add `expr NOT IN (?, ..)`; nothing is added for an empty list
    pub fn where_not_in<I, P>(mut self, expr: &str, values: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Param>,
    {
        let params: Vec<Param> = values.into_iter().map(Into::into).collect();
        if params.is_empty() {
            return self;
        }

        let placeholders = vec!["?"; params.len()].join(", ");
        self.where_clauses
            .push(format!("{} NOT IN ({})", expr, placeholders));
        self.where_params.extend(params);
        self
    }

    /// Add a GROUP BY column
    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        self.group_by.push(column.into());
        self
    }

    /// Add an ORDER BY column
    pub fn order_by(mut self, column: impl Into<String>) -> Self {
        self.order_by.push(column.into());
        self
    }

    /// Add a time bucket SELECT for a period class
    pub fn with_time_bucket(mut self, period: PeriodClass, timestamp_col: &str, alias: &str) -> Self {
        self.select.push(format!(
            "DATE_TRUNC('{}', {}) AS {}",
            period.sql_unit(),
            timestamp_col,
            alias
        ));
        self
    }

    /// Build the final statement
    pub fn build(self) -> Statement {
        let mut sql = String::new();

        // SELECT
        sql.push_str("SELECT ");
        if self.select.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.select.join(", "));
        }

        // FROM
        sql.push_str(" FROM ");
        sql.push_str(&self.table);
        for flatten in &self.flatten {
            sql.push_str(", ");
            sql.push_str(flatten);
        }

        // WHERE
        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clauses.join(" AND "));
        }

        // GROUP BY
        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }

        // ORDER BY
        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }

        let mut params = self.select_params;
        params.extend(self.where_params);
        Statement::new(sql, params)
    }
}

/// One grouped-count query: which events, bucketed how, grouped by what
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRequest {
    /// Object set the events come from
    pub object_set: ObjectSet,
    /// Bucketing granularity
    pub period: PeriodClass,
    /// Event filter
    pub filter: Filter,
    /// Category derivation
    pub key: CategoryKey,
}

impl CountRequest {
    /// Create a new count request
    pub fn new(object_set: ObjectSet, period: PeriodClass, filter: Filter, key: CategoryKey) -> Self {
        Self {
            object_set,
            period,
            filter,
            key,
        }
    }
}

/// Render a count request as warehouse SQL
pub fn count_statement(request: &CountRequest, sql: &SqlConfig) -> Statement {
    let filter = &request.filter;
    let flattened = format!("ah.{}", request.object_set.column());

    let mut builder = QueryBuilder::new(format!("{} ah", sql.access_history))
        .lateral_flatten(&flattened, "f1")
        .select_as("COUNT(*)", "cnt");

    builder = match &request.key {
        CategoryKey::Namespace => {
            builder.select_as(format!("{}({})", sql.namespace_fn, OBJECT_NAME), "category")
        }
        CategoryKey::TableName {
            namespace,
            environment,
        } => builder.select_bind(
            format!("REPLACE({}, ?, '')", OBJECT_NAME),
            "category",
            format!("{}_{}_", namespace, environment),
        ),
    };

    builder = builder
        .with_time_bucket(request.period, "ah.query_start_time", "time_unit")
        .where_clause(format!("{} IS NOT NULL", OBJECT_ID))
        .where_bind("ah.query_start_time >= ?", filter.since);

    if let Some(domain) = &filter.excluded_domain {
        builder = builder.where_bind(format!("{} != ?", OBJECT_DOMAIN), domain.as_str());
    }

    builder = builder.where_bind(
        format!("{}({}) = ?", sql.environment_fn, OBJECT_NAME),
        filter.environment.as_str(),
    );

    if let Some(namespace) = &filter.namespace {
        builder = builder.where_bind(
            format!("{}({}) = ?", sql.namespace_fn, OBJECT_NAME),
            namespace.as_str(),
        );
    }

    builder
        .where_not_in("ah.user_name", filter.excluded_actors.iter().map(String::as_str))
        .group_by("category")
        .group_by("time_unit")
        .order_by("time_unit ASC")
        .build()
}
