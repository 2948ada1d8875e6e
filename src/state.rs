use crate::data::classify::Allowlist;
use crate::data::model::{GroupField, UsageDataset};
use crate::data::summary::{build_report, Report};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until the user opens a file).
    pub dataset: Option<UsageDataset>,

    /// File name of the loaded export, for the top-bar readout.
    pub source_name: Option<String>,

    /// Authorized device models. Fixed at build time, not user-editable.
    pub allowlist: Allowlist,

    /// Which field buckets the report.
    pub group_field: GroupField,

    /// Report derived from the current dataset and group field.
    pub report: Option<Report>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            source_name: None,
            allowlist: Allowlist::builtin(),
            group_field: GroupField::Area,
            report: None,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset, replacing any previous one, and derive
    /// its report.
    pub fn set_dataset(&mut self, source_name: String, dataset: UsageDataset) {
        self.dataset = Some(dataset);
        self.source_name = Some(source_name);
        self.status_message = None;
        self.loading = false;
        self.rebuild_report();
    }

    /// Switch the grouping field and recompute the report.
    pub fn set_group_field(&mut self, field: GroupField) {
        if self.group_field != field {
            self.group_field = field;
            self.rebuild_report();
        }
    }

    /// Recompute the report from scratch. The pipeline has no caching;
    /// every upload or toggle change runs it in full.
    pub fn rebuild_report(&mut self) {
        self.report = self
            .dataset
            .as_ref()
            .map(|ds| build_report(ds, &self.allowlist, self.group_field));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::UsageRecord;

    fn dataset() -> UsageDataset {
        UsageDataset {
            records: vec![UsageRecord {
                username: "alice".to_string(),
                device_id: "DEV-1".to_string(),
                device_model: "iPhone 15".to_string(),
                area: "North".to_string(),
                region: "EMEA".to_string(),
            }],
        }
    }

    #[test]
    fn set_dataset_derives_a_report_and_clears_status() {
        let mut state = AppState::default();
        state.status_message = Some("Error: old".to_string());

        state.set_dataset("usage.csv".to_string(), dataset());

        assert!(state.status_message.is_none());
        let report = state.report.as_ref().unwrap();
        assert_eq!(report.rows[0].group, "North");
    }

    #[test]
    fn toggling_the_group_field_rebuilds_the_report() {
        let mut state = AppState::default();
        state.set_dataset("usage.csv".to_string(), dataset());

        state.set_group_field(GroupField::Region);

        let report = state.report.as_ref().unwrap();
        assert_eq!(report.group_field, GroupField::Region);
        assert_eq!(report.rows[0].group, "EMEA");
    }

    #[test]
    fn no_report_without_a_dataset() {
        let mut state = AppState::default();
        state.set_group_field(GroupField::Region);
        assert!(state.report.is_none());
    }
}
