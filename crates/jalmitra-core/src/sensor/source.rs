//! Sensor data source port.

use async_trait::async_trait;

use super::manual::ManualReading;
use super::model::{Alert, UsageSummary, WellReading};
use crate::error::Result;

/// Remote source of well readings and alerts.
///
/// Every call may suspend (network latency); implementations must not block
/// the executor.
#[async_trait]
pub trait SensorDataSource: Send + Sync {
    /// Fetches the latest reading for `well_id`.
    async fn fetch_well_reading(&self, well_id: &str) -> Result<WellReading>;

    /// Fetches the alert list to show for `well_id`.
    ///
    /// The bundled mock returns the unresolved alerts of every known well,
    /// ignoring `well_id`.
    async fn fetch_alerts(&self, well_id: &str) -> Result<Vec<Alert>>;

    async fn fetch_usage_summary(&self) -> Result<UsageSummary>;

    /// Stores a manual reading. Returns `false` when the well is unknown.
    async fn submit_manual_reading(&self, well_id: &str, reading: &ManualReading) -> Result<bool>;
}
