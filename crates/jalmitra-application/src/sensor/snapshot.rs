use jalmitra_core::JalmitraError;
use jalmitra_core::sensor::{Alert, AlertFilter, AlertType, UsageSummary, WellReading};
use serde::Serialize;
use std::collections::BTreeMap;

/// Refresh lifecycle: `Idle -> Loading -> (Ready | Failed)`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "error", rename_all = "camelCase")]
pub enum DataStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The last refresh failed; the data held alongside is from the previous success.
    Failed(JalmitraError),
}

/// Everything the sensor container exposes, committed as one unit.
///
/// `well_id` is the well currently being tracked. While a switch is loading
/// or after it failed, `reading` may still belong to the previous well.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorSnapshot {
    pub well_id: String,
    pub status: DataStatus,
    pub reading: Option<WellReading>,
    pub usage: Option<UsageSummary>,
    pub alerts: Vec<Alert>,
}

impl SensorSnapshot {
    pub(crate) fn new(well_id: impl Into<String>) -> Self {
        Self {
            well_id: well_id.into(),
            ..Self::default()
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == DataStatus::Loading
    }

    pub fn error(&self) -> Option<&JalmitraError> {
        match &self.status {
            DataStatus::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub fn alert(&self, alert_id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|alert| alert.id == alert_id)
    }

    pub fn alerts_filtered(&self, filter: AlertFilter) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(move |alert| filter.matches(alert))
    }

    /// Badge count.
    pub fn unresolved_count(&self) -> usize {
        self.alerts_filtered(AlertFilter::Active).count()
    }

    pub fn count_by_type(&self) -> BTreeMap<AlertType, usize> {
        let mut counts = BTreeMap::new();
        for alert in &self.alerts {
            *counts.entry(alert.alert_type).or_insert(0) += 1;
        }
        counts
    }
}
