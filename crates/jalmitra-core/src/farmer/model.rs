//! FarmerProfile domain model.
//!
//! Represents the single active farmer: identity, locale, unit preference and
//! the well whose readings the dashboard follows.

use serde::{Deserialize, Serialize};

use crate::error::{JalmitraError, Result};

/// Durable storage key holding the serialized profile.
pub const PROFILE_STORAGE_KEY: &str = "farmer";

/// Display language of the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Bn,
}

/// Unit used when showing water depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementUnits {
    #[default]
    Feet,
    Meters,
}

/// Farmer profile domain model.
///
/// Records written by earlier dashboard builds used `language`, `wellId` and
/// `units`; those names are accepted on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmerProfile {
    pub id: String,
    pub name: String,
    pub phone: String,
    #[serde(alias = "language")]
    pub preferred_language: Language,
    pub village: String,
    #[serde(alias = "wellId")]
    pub assigned_well_id: String,
    #[serde(alias = "units")]
    pub measurement_units: MeasurementUnits,
}

impl FarmerProfile {
    /// Rejects a profile without identity.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(JalmitraError::invalid_profile("profile id must not be empty"));
        }
        Ok(())
    }
}

impl Default for FarmerProfile {
    fn default() -> Self {
        Self {
            id: "F1001".to_string(),
            name: "Ranindram Patel".to_string(),
            phone: "9876543210".to_string(),
            preferred_language: Language::En,
            village: "Kurukshetra".to_string(),
            assigned_well_id: "WB124".to_string(),
            measurement_units: MeasurementUnits::Feet,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile() {
        let profile = FarmerProfile::default();
        assert_eq!(profile.id, "F1001");
        assert_eq!(profile.assigned_well_id, "WB124");
        assert_eq!(profile.measurement_units, MeasurementUnits::Feet);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_blank_id_is_rejected() {
        let profile = FarmerProfile {
            id: "  ".to_string(),
            ..FarmerProfile::default()
        };
        assert!(profile.validate().unwrap_err().is_invalid_profile());
    }

    #[test]
    fn test_reads_legacy_field_names() {
        let json = r#"{
            "id": "F2002",
            "name": "Asha",
            "phone": "9000000000",
            "language": "hi",
            "village": "Panipat",
            "wellId": "WB126",
            "units": "meters"
        }"#;
        let profile: FarmerProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.preferred_language, Language::Hi);
        assert_eq!(profile.assigned_well_id, "WB126");
        assert_eq!(profile.measurement_units, MeasurementUnits::Meters);
    }

    #[test]
    fn test_writes_camel_case() {
        let json = serde_json::to_value(FarmerProfile::default()).unwrap();
        assert_eq!(json["assignedWellId"], "WB124");
        assert_eq!(json["preferredLanguage"], "en");
        assert_eq!(json["measurementUnits"], "feet");
    }
}
