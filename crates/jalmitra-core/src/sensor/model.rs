//! Sensor and alert domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Water level classification, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LevelStatus {
    Risky,
    Moderate,
    Safe,
}

impl fmt::Display for LevelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LevelStatus::Safe => "Safe",
            LevelStatus::Moderate => "Moderate",
            LevelStatus::Risky => "Risky",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// Latest readout of one well.
///
/// Replaced wholesale on every refresh, never merged field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WellReading {
    pub well_id: String,
    /// Fill level, 0-100.
    pub level_percent: f64,
    pub level_status: LevelStatus,
    pub total_dissolved_solids_ppm: f64,
    #[serde(rename = "pH")]
    pub ph: f64,
    pub temperature_celsius: f64,
    pub last_sync_timestamp: DateTime<Utc>,
    pub location: Location,
}

/// Daily water usage and savings for the farmer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    pub today_usage_liters: f64,
    pub today_limit_liters: f64,
    pub saved_water_liters: f64,
    pub saved_money_currency: f64,
}

impl UsageSummary {
    /// Whether today's usage has reached the limit.
    pub fn over_limit(&self) -> bool {
        self.today_usage_liters >= self.today_limit_liters
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AlertType {
    #[serde(rename = "High TDS")]
    HighTds,
    #[serde(rename = "Low Level")]
    LowLevel,
    #[serde(rename = "High Usage")]
    HighUsage,
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            AlertType::HighTds => "High TDS",
            AlertType::LowLevel => "Low Level",
            AlertType::HighUsage => "High Usage",
        };
        f.pad(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    pub id: String,
    pub well_id: String,
    #[serde(rename = "type")]
    pub alert_type: AlertType,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub resolved: bool,
}

impl Alert {
    /// Marks the alert resolved. Returns `true` if it was unresolved before.
    ///
    /// There is no way back to unresolved.
    pub fn resolve(&mut self) -> bool {
        let changed = !self.resolved;
        self.resolved = true;
        changed
    }
}

/// Alert list views offered by the alerts page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlertFilter {
    #[default]
    All,
    Active,
    Resolved,
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        match self {
            AlertFilter::All => true,
            AlertFilter::Active => !alert.resolved,
            AlertFilter::Resolved => alert.resolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn alert() -> Alert {
        Alert {
            id: "A1".to_string(),
            well_id: "WB124".to_string(),
            alert_type: AlertType::HighTds,
            message: "High TDS detected in well WB124".to_string(),
            timestamp: Utc.with_ymd_and_hms(2025, 5, 18, 10, 30, 0).unwrap(),
            resolved: false,
        }
    }

    #[test]
    fn test_resolve_is_one_way() {
        let mut alert = alert();
        assert!(alert.resolve());
        assert!(alert.resolved);
        assert!(!alert.resolve());
        assert!(alert.resolved);
    }

    #[test]
    fn test_alert_type_wire_names() {
        let json = serde_json::to_value(alert()).unwrap();
        assert_eq!(json["type"], "High TDS");
        assert_eq!(json["wellId"], "WB124");
    }

    #[test]
    fn test_filter() {
        let open = alert();
        let mut closed = alert();
        closed.resolve();

        assert!(AlertFilter::All.matches(&open));
        assert!(AlertFilter::Active.matches(&open));
        assert!(!AlertFilter::Active.matches(&closed));
        assert!(AlertFilter::Resolved.matches(&closed));
    }

    #[test]
    fn test_usage_over_limit() {
        let usage = UsageSummary {
            today_usage_liters: 950.0,
            today_limit_liters: 1000.0,
            saved_water_liters: 5000.0,
            saved_money_currency: 50.0,
        };
        assert!(!usage.over_limit());
    }
}
