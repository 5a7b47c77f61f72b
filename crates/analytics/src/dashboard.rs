//! Dashboard
//!
//! The four panels of the access dashboard: usage of underlying and direct
//! objects, and one drill-down for each. The two usage panels run together,
//! then the two drill-downs. Panels share no state and each keeps its own
//! result, so one failing panel leaves the others intact.

use egress_query::ObjectSet;
use serde_json::{Value, json};

use crate::error::Result;
use crate::panels::{AccessEngine, PanelOutput, Selection};

/// Namespaces to drill into; unset targets follow the usage panel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrillTargets {
    /// Drill-down namespace for underlying objects
    pub underlying: Option<String>,
    /// Drill-down namespace for direct objects
    pub direct: Option<String>,
}

/// Evaluated dashboard
#[derive(Debug)]
pub struct Dashboard {
    /// Underlying usage per namespace
    pub underlying: Result<PanelOutput>,
    /// Direct usage per namespace
    pub direct: Result<PanelOutput>,
    /// Underlying usage per table, absent without a target
    pub underlying_drill: Option<Result<PanelOutput>>,
    /// Direct usage per table, absent without a target
    pub direct_drill: Option<Result<PanelOutput>>,
}

impl Dashboard {
    /// Evaluate all panels for a selection
    ///
    /// The selection's object set is ignored; each panel picks its own. An
    /// environment outside the allow-list fails the whole dashboard before
    /// any query runs.
    pub async fn load(engine: &AccessEngine, selection: &Selection, drill: DrillTargets) -> Result<Self> {
        engine.settings().check_environment(&selection.environment)?;

        let base = selection.clone().with_object_set(ObjectSet::Base);
        let direct = selection.clone().with_object_set(ObjectSet::Direct);

        let (underlying_usage, direct_usage) =
            tokio::join!(engine.usage(&base), engine.usage(&direct));

        let underlying_target = drill.underlying.or_else(|| first_category(&underlying_usage));
        let direct_target = drill.direct.or_else(|| first_category(&direct_usage));

        let (underlying_drill, direct_drill) = tokio::join!(
            async {
                match &underlying_target {
                    Some(ns) => Some(engine.drill_down(ns, &base).await),
                    None => None,
                }
            },
            async {
                match &direct_target {
                    Some(ns) => Some(engine.drill_down(ns, &direct).await),
                    None => None,
                }
            },
        );

        tracing::debug!(
            period = %selection.period,
            environment = %selection.environment,
            underlying_target = ?underlying_target,
            direct_target = ?direct_target,
            failed = [&underlying_usage, &direct_usage].iter().filter(|r| r.is_err()).count(),
            "dashboard loaded"
        );

        Ok(Self {
            underlying: underlying_usage,
            direct: direct_usage,
            underlying_drill,
            direct_drill,
        })
    }

    /// Panels in display order, keyed by slot name
    pub fn panels(&self) -> [(&'static str, Option<&Result<PanelOutput>>); 4] {
        [
            ("underlying", Some(&self.underlying)),
            ("direct", Some(&self.direct)),
            ("underlying_drill", self.underlying_drill.as_ref()),
            ("direct_drill", self.direct_drill.as_ref()),
        ]
    }

    /// JSON document with every panel's chart or error
    pub fn to_json(&self) -> Value {
        let mut doc = serde_json::Map::new();
        for (slot, panel) in self.panels() {
            let value = match panel {
                Some(Ok(output)) => json!({ "title": output.title, "chart": output.chart }),
                Some(Err(e)) => json!({ "error": e.to_string() }),
                None => Value::Null,
            };
            doc.insert(slot.to_string(), value);
        }
        Value::Object(doc)
    }
}

/// Default drill target: the first category of a usage panel
fn first_category(usage: &Result<PanelOutput>) -> Option<String> {
    usage
        .as_ref()
        .ok()
        .and_then(|output| output.pivot.categories.first().cloned())
}
