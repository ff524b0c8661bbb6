//! Composition root.

use crate::farmer_profile_manager::FarmerProfileManager;
use crate::sensor::{RefreshOutcome, SensorDataManager};
use crate::session_manager::SessionManager;
use jalmitra_core::auth::{Authenticator, Credentials};
use jalmitra_core::config::AppConfig;
use jalmitra_core::error::Result;
use jalmitra_core::farmer::FarmerProfile;
use jalmitra_core::sensor::{ManualReading, SensorDataSource};
use jalmitra_core::storage::KeyValueStore;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// The three state containers for one process, wired together.
///
/// Construction order is session, profile, sensor data. The sensor container
/// follows the profile's assigned well through a background watcher that
/// lives as long as the context.
pub struct AppContext {
    session: Arc<SessionManager>,
    profile: Arc<FarmerProfileManager>,
    sensor: Arc<SensorDataManager>,
    authenticator: Arc<dyn Authenticator>,
    well_watcher: JoinHandle<()>,
}

impl AppContext {
    /// Restores the session, loads the profile and performs the first refresh.
    ///
    /// Must be called within a tokio runtime. A failed first refresh leaves
    /// the sensor container `Failed` without aborting startup.
    ///
    /// # Arguments
    ///
    /// * `store` - Backing storage shared by the session and profile managers
    /// * `source` - Sensor data source for the tracked well
    /// * `authenticator` - Checks credentials on `sign_in`
    pub async fn bootstrap(
        config: &AppConfig,
        store: Arc<dyn KeyValueStore>,
        source: Arc<dyn SensorDataSource>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        let session = Arc::new(SessionManager::new(store.clone()));
        session.restore().await;

        let profile = Arc::new(FarmerProfileManager::new(store));
        let loaded = profile.load().await;

        let sensor = Arc::new(
            SensorDataManager::new(source, loaded.assigned_well_id)
                .with_refresh_timeout(config.refresh.timeout()),
        );
        if let Err(e) = sensor.refresh().await {
            tracing::warn!(error = %e, "initial refresh failed");
        }

        let well_watcher = spawn_well_watcher(&profile, &sensor);
        tracing::info!(
            signed_in = session.is_active(),
            well_id = %sensor.well_id(),
            "application ready"
        );

        Self {
            session,
            profile,
            sensor,
            authenticator,
            well_watcher,
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn profile(&self) -> &FarmerProfileManager {
        &self.profile
    }

    pub fn sensor(&self) -> &SensorDataManager {
        &self.sensor
    }

    /// Checks credentials and records the resulting farmer id as the session.
    ///
    /// # Returns
    ///
    /// The signed-in farmer id, or `InvalidCredentials` when the
    /// credentials are rejected.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<String> {
        let user_id = self.authenticator.authenticate(credentials).await?;
        self.session.login(&user_id).await?;
        Ok(user_id)
    }

    /// Ends the session. The stored profile is kept.
    pub async fn sign_out(&self) -> Result<()> {
        self.session.logout().await
    }

    /// Replaces the profile. A new assigned well is picked up by the watcher.
    pub async fn update_profile(&self, profile: FarmerProfile) -> Result<()> {
        self.profile.update(profile).await
    }

    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        self.sensor.refresh().await
    }

    pub fn resolve_alert(&self, alert_id: &str) -> bool {
        self.sensor.resolve_alert(alert_id)
    }

    pub async fn submit_manual_reading(&self, reading: ManualReading) -> Result<RefreshOutcome> {
        self.sensor.submit_manual_reading(reading).await
    }
}

impl Drop for AppContext {
    fn drop(&mut self) {
        self.well_watcher.abort();
    }
}

fn spawn_well_watcher(
    profile: &FarmerProfileManager,
    sensor: &Arc<SensorDataManager>,
) -> JoinHandle<()> {
    let mut profiles = profile.subscribe();
    profiles.borrow_and_update();
    let sensor = Arc::clone(sensor);

    tokio::spawn(async move {
        while profiles.changed().await.is_ok() {
            let well_id = profiles.borrow_and_update().assigned_well_id.clone();
            if !sensor.retarget(&well_id) {
                continue;
            }

            // Detached so the loop keeps up with further switches.
            let sensor = Arc::clone(&sensor);
            tokio::spawn(async move {
                if let Err(e) = sensor.refresh().await {
                    tracing::warn!(%well_id, error = %e, "refresh after well change failed");
                }
            });
        }
        tracing::debug!("profile channel closed, well watcher stopped");
    })
}
