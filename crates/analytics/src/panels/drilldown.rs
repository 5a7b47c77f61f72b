//! Drill-down panel
//!
//! Accesses per table inside one namespace. Table names are object names
//! with the `{namespace}_{environment}_` prefix removed.

use async_trait::async_trait;

use crate::aggregate::CategoryKey;
use crate::builder::CountRequest;
use crate::panels::{Panel, Selection};
use crate::settings::Settings;
use crate::window::TimeWindow;

/// Second-level panel grouping by table name
pub struct DrillDownPanel {
    namespace: String,
    selection: Selection,
}

impl DrillDownPanel {
    /// Create a new drill-down panel for a namespace
    pub fn new(namespace: impl Into<String>, selection: Selection) -> Self {
        Self {
            namespace: namespace.into(),
            selection,
        }
    }

    /// Namespace being drilled into
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

#[async_trait]
impl Panel for DrillDownPanel {
    fn name(&self) -> &'static str {
        "drill_down"
    }

    fn title(&self) -> String {
        format!(
            "{} {} Data Egress",
            self.namespace,
            self.selection.object_set.label()
        )
    }

    fn selection(&self) -> &Selection {
        &self.selection
    }

    fn request(&self, settings: &Settings, window: &TimeWindow) -> CountRequest {
        let environment = &self.selection.environment;
        let filter = settings
            .filter(window.boundary, environment)
            .with_namespace(self.namespace.clone());

        CountRequest::new(
            self.selection.object_set,
            self.selection.period,
            filter,
            CategoryKey::table_name(self.namespace.clone(), environment.clone()),
        )
    }
}
