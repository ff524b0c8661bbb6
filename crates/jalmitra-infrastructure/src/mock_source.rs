//! Simulated sensor backend.
//!
//! Serves a fixed set of wells and alerts with artificial latency. Manual
//! readings mutate the in-memory tables for the lifetime of the instance.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use jalmitra_core::clock::Clock;
use jalmitra_core::config::DataSourceSettings;
use jalmitra_core::error::{JalmitraError, Result};
use jalmitra_core::sensor::{
    Alert, AlertType, Location, ManualReading, SensorDataSource, UsageSummary, WellReading,
    classify_level,
};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

struct Tables {
    wells: BTreeMap<String, WellReading>,
    alerts: BTreeMap<String, Vec<Alert>>,
    usage: UsageSummary,
}

pub struct MockSensorDataSource {
    settings: DataSourceSettings,
    clock: Arc<dyn Clock>,
    tables: Mutex<Tables>,
}

impl MockSensorDataSource {
    pub fn new(settings: DataSourceSettings, clock: Arc<dyn Clock>) -> Self {
        Self {
            settings,
            clock,
            tables: Mutex::new(seed_tables()),
        }
    }

    fn tables(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

async fn simulate_latency(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

#[async_trait]
impl SensorDataSource for MockSensorDataSource {
    async fn fetch_well_reading(&self, well_id: &str) -> Result<WellReading> {
        simulate_latency(self.settings.reading_delay_ms).await;

        let mut reading = self
            .tables()
            .wells
            .get(well_id)
            .cloned()
            .ok_or_else(|| JalmitraError::not_found("well", well_id))?;
        reading.last_sync_timestamp = self.clock.now();

        tracing::debug!(well_id, level = reading.level_percent, "served well reading");
        Ok(reading)
    }

    async fn fetch_alerts(&self, well_id: &str) -> Result<Vec<Alert>> {
        simulate_latency(self.settings.alerts_delay_ms).await;

        // Every well's alerts, whichever well was asked for.
        let alerts: Vec<Alert> = self
            .tables()
            .alerts
            .values()
            .flatten()
            .filter(|alert| !alert.resolved)
            .cloned()
            .collect();

        tracing::debug!(well_id, count = alerts.len(), "served alerts");
        Ok(alerts)
    }

    async fn fetch_usage_summary(&self) -> Result<UsageSummary> {
        simulate_latency(self.settings.usage_delay_ms).await;
        Ok(self.tables().usage.clone())
    }

    async fn submit_manual_reading(&self, well_id: &str, reading: &ManualReading) -> Result<bool> {
        simulate_latency(self.settings.submit_delay_ms).await;

        let now = self.clock.now();
        let mut tables = self.tables();
        let Some(stored) = tables.wells.get_mut(well_id) else {
            tracing::debug!(well_id, "manual reading for unknown well");
            return Ok(false);
        };

        if let Some(level) = reading.level_percent {
            stored.level_percent = level;
            stored.level_status = classify_level(level);
        }
        if let Some(tds) = reading.total_dissolved_solids_ppm {
            stored.total_dissolved_solids_ppm = tds;
        }
        if let Some(temperature) = reading.temperature_celsius {
            stored.temperature_celsius = temperature;
        }
        if let Some(ph) = reading.ph {
            stored.ph = ph;
        }
        stored.last_sync_timestamp = now;

        Ok(true)
    }
}

fn recorded_at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 18, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

#[allow(clippy::too_many_arguments)]
fn well(
    id: &str,
    level: f64,
    tds: f64,
    ph: f64,
    temperature: f64,
    synced: DateTime<Utc>,
    lat: f64,
    lng: f64,
) -> WellReading {
    WellReading {
        well_id: id.to_string(),
        level_percent: level,
        level_status: classify_level(level),
        total_dissolved_solids_ppm: tds,
        ph,
        temperature_celsius: temperature,
        last_sync_timestamp: synced,
        location: Location { lat, lng },
    }
}

fn alert(
    id: &str,
    well_id: &str,
    alert_type: AlertType,
    message: &str,
    at: DateTime<Utc>,
) -> Alert {
    Alert {
        id: id.to_string(),
        well_id: well_id.to_string(),
        alert_type,
        message: message.to_string(),
        timestamp: at,
        resolved: false,
    }
}

fn seed_tables() -> Tables {
    let wells = [
        well("WB124", 75.0, 280.0, 7.1, 25.0, recorded_at(14, 30), 23.5, 87.0),
        well("WB125", 40.0, 450.0, 6.8, 27.0, recorded_at(13, 45), 23.52, 87.05),
        well("WB126", 15.0, 820.0, 6.5, 28.0, recorded_at(12, 15), 23.48, 87.08),
    ]
    .into_iter()
    .map(|w| (w.well_id.clone(), w))
    .collect();

    let mut alerts: BTreeMap<String, Vec<Alert>> = BTreeMap::new();
    for seeded in [
        alert(
            "A1",
            "WB124",
            AlertType::HighTds,
            "High TDS detected in well WB124",
            recorded_at(10, 30),
        ),
        alert(
            "A2",
            "WB125",
            AlertType::LowLevel,
            "Low water level in well WB125",
            recorded_at(9, 15),
        ),
        alert(
            "A3",
            "WB126",
            AlertType::HighUsage,
            "Unusually high water usage from well WB126",
            recorded_at(11, 45),
        ),
        alert(
            "A4",
            "WB126",
            AlertType::LowLevel,
            "Critical water level in well WB126",
            recorded_at(8, 30),
        ),
    ] {
        alerts.entry(seeded.well_id.clone()).or_default().push(seeded);
    }

    Tables {
        wells,
        alerts,
        usage: UsageSummary {
            today_usage_liters: 950.0,
            today_limit_liters: 1000.0,
            saved_water_liters: 5000.0,
            saved_money_currency: 50.0,
        },
    }
}
