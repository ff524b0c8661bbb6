//! Farmer profile container.

use jalmitra_core::error::Result;
use jalmitra_core::farmer::{FarmerProfile, PROFILE_STORAGE_KEY};
use jalmitra_core::storage::KeyValueStore;
use std::sync::Arc;
use tokio::sync::{Mutex, watch};

/// Holds the one active farmer profile.
///
/// `update` is the only way `assigned_well_id` changes; the sensor container
/// follows it through `subscribe`.
pub struct FarmerProfileManager {
    store: Arc<dyn KeyValueStore>,
    state: watch::Sender<FarmerProfile>,
    writer: Mutex<()>,
}

impl FarmerProfileManager {
    /// Creates a manager over `store`.
    ///
    /// Holds the built-in default profile until `load` runs.
    ///
    /// # Arguments
    ///
    /// * `store` - Durable storage; only the `farmer` key is touched
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (state, _) = watch::channel(FarmerProfile::default());
        Self {
            store,
            state,
            writer: Mutex::new(()),
        }
    }

    /// Loads the stored profile, falling back to the default.
    ///
    /// Never fails. A missing record is the first-run case; an unreadable or
    /// invalid one is logged and replaced by the default in memory only.
    pub async fn load(&self) -> FarmerProfile {
        let profile = match self.store.get(PROFILE_STORAGE_KEY).await {
            Ok(Some(raw)) => match serde_json::from_str::<FarmerProfile>(&raw) {
                Ok(profile) if profile.validate().is_ok() => profile,
                Ok(_) => {
                    tracing::warn!("stored profile has no id, using default");
                    FarmerProfile::default()
                }
                Err(e) => {
                    tracing::warn!(error = %e, "stored profile is unreadable, using default");
                    FarmerProfile::default()
                }
            },
            Ok(None) => FarmerProfile::default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored profile, using default");
                FarmerProfile::default()
            }
        };

        tracing::debug!(
            farmer_id = %profile.id,
            well_id = %profile.assigned_well_id,
            "profile loaded"
        );
        self.state.send_replace(profile.clone());
        profile
    }

    /// Replaces the whole profile and persists it.
    ///
    /// Storage is written first; readers only see the new profile once it is
    /// durable. This is the only way the assigned well changes.
    ///
    /// # Arguments
    ///
    /// * `profile` - The complete new profile
    ///
    /// # Returns
    ///
    /// `InvalidProfile` if `profile` has no id, `StorageWriteFailed` if it
    /// could not be persisted. In both cases nothing changes.
    pub async fn update(&self, profile: FarmerProfile) -> Result<()> {
        profile.validate()?;
        let encoded = serde_json::to_string(&profile)?;

        let _guard = self.writer.lock().await;
        self.store.set(PROFILE_STORAGE_KEY, &encoded).await?;

        tracing::info!(
            farmer_id = %profile.id,
            well_id = %profile.assigned_well_id,
            "profile updated"
        );
        self.state.send_replace(profile);
        Ok(())
    }

    /// Drops the stored profile record.
    ///
    /// The in-memory profile stays as it is, so the assigned well does not
    /// change; the next `load` in a fresh process falls back to the default.
    ///
    /// # Returns
    ///
    /// `StorageWriteFailed` if the record could not be removed.
    pub async fn forget(&self) -> Result<()> {
        let _guard = self.writer.lock().await;
        self.store.remove(PROFILE_STORAGE_KEY).await?;
        tracing::info!("stored profile cleared");
        Ok(())
    }

    pub fn snapshot(&self) -> FarmerProfile {
        self.state.borrow().clone()
    }

    pub fn assigned_well_id(&self) -> String {
        self.state.borrow().assigned_well_id.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FarmerProfile> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jalmitra_core::farmer::{Language, MeasurementUnits};
    use jalmitra_infrastructure::MemoryKeyValueStore;

    fn sample() -> FarmerProfile {
        FarmerProfile {
            id: "F2002".to_string(),
            name: "Asha Devi".to_string(),
            phone: "+91 9000000000".to_string(),
            preferred_language: Language::Bn,
            village: "Bishnupur".to_string(),
            assigned_well_id: "WB126".to_string(),
            measurement_units: MeasurementUnits::Meters,
        }
    }

    #[tokio::test]
    async fn test_load_without_stored_profile_returns_default() {
        let manager = FarmerProfileManager::new(Arc::new(MemoryKeyValueStore::new()));
        let profile = manager.load().await;

        assert_eq!(profile, FarmerProfile::default());
        assert_eq!(profile.id, "F1001");
        assert_eq!(profile.assigned_well_id, "WB124");
        assert_eq!(profile.measurement_units, MeasurementUnits::Feet);
    }

    #[tokio::test]
    async fn test_update_survives_reload() {
        let store = MemoryKeyValueStore::new();
        let manager = FarmerProfileManager::new(Arc::new(store.clone()));
        manager.update(sample()).await.unwrap();
        assert_eq!(manager.assigned_well_id(), "WB126");

        let reloaded = FarmerProfileManager::new(Arc::new(store));
        assert_eq!(reloaded.load().await, sample());
    }

    #[tokio::test]
    async fn test_update_with_empty_id_is_rejected() {
        let store = MemoryKeyValueStore::new();
        let manager = FarmerProfileManager::new(Arc::new(store.clone()));
        manager.update(sample()).await.unwrap();

        let invalid = FarmerProfile {
            id: String::new(),
            name: "X".to_string(),
            ..sample()
        };
        assert!(manager.update(invalid).await.unwrap_err().is_invalid_profile());

        assert_eq!(manager.snapshot(), sample());
        let stored = store.get(PROFILE_STORAGE_KEY).await.unwrap().unwrap();
        assert_eq!(serde_json::from_str::<FarmerProfile>(&stored).unwrap(), sample());
    }

    #[tokio::test]
    async fn test_write_failure_keeps_previous_profile() {
        let store = MemoryKeyValueStore::new();
        let manager = FarmerProfileManager::new(Arc::new(store.clone()));
        manager.load().await;

        store.set_fail_writes(true);
        let err = manager.update(sample()).await.unwrap_err();
        assert!(err.is_storage_write_failed());
        assert_eq!(manager.snapshot(), FarmerProfile::default());
    }

    #[tokio::test]
    async fn test_corrupt_record_falls_back_to_default() {
        let store = MemoryKeyValueStore::new();
        store.set(PROFILE_STORAGE_KEY, "{not json").await.unwrap();

        let manager = FarmerProfileManager::new(Arc::new(store));
        assert_eq!(manager.load().await, FarmerProfile::default());
    }

    #[tokio::test]
    async fn test_forget_clears_storage_but_keeps_active_profile() {
        let store = MemoryKeyValueStore::new();
        let manager = FarmerProfileManager::new(Arc::new(store.clone()));
        manager.update(sample()).await.unwrap();
        let mut rx = manager.subscribe();
        rx.borrow_and_update();

        manager.forget().await.unwrap();
        assert_eq!(manager.snapshot(), sample());
        assert_eq!(manager.assigned_well_id(), "WB126");
        assert!(!rx.has_changed().unwrap());
        assert!(store.get(PROFILE_STORAGE_KEY).await.unwrap().is_none());

        let reloaded = FarmerProfileManager::new(Arc::new(store));
        assert_eq!(reloaded.load().await, FarmerProfile::default());
    }

    #[tokio::test]
    async fn test_subscribers_see_well_change() {
        let manager = FarmerProfileManager::new(Arc::new(MemoryKeyValueStore::new()));
        let mut rx = manager.subscribe();

        manager.update(sample()).await.unwrap();
        assert_eq!(rx.borrow_and_update().assigned_well_id, "WB126");
    }
}
