//! Usage panel
//!
//! Accesses per namespace for one object set.

use async_trait::async_trait;

use crate::aggregate::CategoryKey;
use crate::builder::CountRequest;
use crate::panels::{Panel, Selection};
use crate::settings::Settings;
use crate::window::TimeWindow;

/// Top-level panel grouping by namespace
pub struct UsagePanel {
    selection: Selection,
}

impl UsagePanel {
    /// Create a new usage panel
    pub fn new(selection: Selection) -> Self {
        Self { selection }
    }
}

#[async_trait]
impl Panel for UsagePanel {
    fn name(&self) -> &'static str {
        "usage"
    }

    fn title(&self) -> String {
        format!("{} Data Egress", self.selection.object_set.label())
    }

    fn selection(&self) -> &Selection {
        &self.selection
    }

    fn request(&self, settings: &Settings, window: &TimeWindow) -> CountRequest {
        CountRequest::new(
            self.selection.object_set,
            self.selection.period,
            settings.filter(window.boundary, &self.selection.environment),
            CategoryKey::Namespace,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::period::PeriodClass;
    use chrono::{TimeZone, Utc};
    use egress_config::Config;
    use egress_query::ObjectSet;

    #[test]
    fn test_titles() {
        let base = UsagePanel::new(Selection::new(PeriodClass::Daily, "PRD"));
        let direct = UsagePanel::new(
            Selection::new(PeriodClass::Daily, "PRD").with_object_set(ObjectSet::Direct),
        );

        assert_eq!(base.title(), "Underlying Data Egress");
        assert_eq!(direct.title(), "Direct Data Egress");
    }

    #[test]
    fn test_request() {
        let settings = Settings::from_config(&Config::default()).unwrap();
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 10, 15, 0).unwrap();
        let selection = Selection::new(PeriodClass::Hourly, "TST").with_as_of(now);
        let window = selection.window(&settings);

        let request = UsagePanel::new(selection).request(&settings, &window);

        assert_eq!(request.key, CategoryKey::Namespace);
        assert_eq!(request.filter.environment, "TST");
        assert_eq!(
            request.filter.since,
            Utc.with_ymd_and_hms(2024, 5, 7, 10, 0, 0).unwrap()
        );
        assert!(request.filter.namespace.is_none());
    }
}
