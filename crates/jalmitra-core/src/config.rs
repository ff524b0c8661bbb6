//! Application configuration.
//!
//! Every field has a default so an empty or missing config file is valid.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub data_source: DataSourceSettings,
    #[serde(default)]
    pub refresh: RefreshSettings,
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            storage: StorageSettings::default(),
            data_source: DataSourceSettings::default(),
            refresh: RefreshSettings::default(),
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Overrides the durable store location.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Simulated latency of the mock data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourceSettings {
    #[serde(default = "default_reading_delay_ms")]
    pub reading_delay_ms: u64,
    #[serde(default = "default_alerts_delay_ms")]
    pub alerts_delay_ms: u64,
    #[serde(default = "default_usage_delay_ms")]
    pub usage_delay_ms: u64,
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
}

fn default_reading_delay_ms() -> u64 {
    300
}

fn default_alerts_delay_ms() -> u64 {
    200
}

fn default_usage_delay_ms() -> u64 {
    250
}

fn default_submit_delay_ms() -> u64 {
    400
}

impl DataSourceSettings {
    /// No simulated latency at all.
    pub fn instant() -> Self {
        Self {
            reading_delay_ms: 0,
            alerts_delay_ms: 0,
            usage_delay_ms: 0,
            submit_delay_ms: 0,
        }
    }
}

impl Default for DataSourceSettings {
    fn default() -> Self {
        Self {
            reading_delay_ms: default_reading_delay_ms(),
            alerts_delay_ms: default_alerts_delay_ms(),
            usage_delay_ms: default_usage_delay_ms(),
            submit_delay_ms: default_submit_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefreshSettings {
    /// Upper bound on one refresh. Unset means wait indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl RefreshSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.data_source.reading_delay_ms, 300);
        assert_eq!(config.data_source.alerts_delay_ms, 200);
        assert!(config.refresh.timeout().is_none());
        assert!(config.storage.path.is_none());
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            log_level = "debug"

            [refresh]
            timeout_secs = 5

            [data_source]
            alerts_delay_ms = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.refresh.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.data_source.alerts_delay_ms, 10);
        assert_eq!(config.data_source.reading_delay_ms, 300);
    }
}
