//! Farmer-entered sensor readings.

use serde::{Deserialize, Serialize};

use crate::error::{JalmitraError, Result};

/// A reading typed in by the farmer when the well's sensor cannot sync.
///
/// Every field is optional; the ones present overwrite the stored reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualReading {
    pub level_percent: Option<f64>,
    pub total_dissolved_solids_ppm: Option<f64>,
    pub temperature_celsius: Option<f64>,
    #[serde(rename = "pH")]
    pub ph: Option<f64>,
}

impl ManualReading {
    pub fn is_empty(&self) -> bool {
        self.level_percent.is_none()
            && self.total_dissolved_solids_ppm.is_none()
            && self.temperature_celsius.is_none()
            && self.ph.is_none()
    }

    /// Checks that at least one field is present and each lies in its range.
    pub fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(JalmitraError::invalid_reading("no values supplied"));
        }
        check_range("level", self.level_percent, 0.0, 100.0)?;
        check_range("TDS", self.total_dissolved_solids_ppm, 0.0, 5000.0)?;
        check_range("temperature", self.temperature_celsius, 0.0, 50.0)?;
        check_range("pH", self.ph, 0.0, 14.0)?;
        Ok(())
    }
}

fn check_range(name: &str, value: Option<f64>, min: f64, max: f64) -> Result<()> {
    match value {
        Some(v) if !(min..=max).contains(&v) => Err(JalmitraError::invalid_reading(format!(
            "{name} must be between {min} and {max}, got {v}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_reading_is_rejected() {
        let err = ManualReading::default().validate().unwrap_err();
        assert!(matches!(err, JalmitraError::InvalidReading(_)));
    }

    #[test]
    fn test_partial_reading_is_accepted() {
        let reading = ManualReading {
            level_percent: Some(42.5),
            ..ManualReading::default()
        };
        assert!(reading.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_values() {
        let cases = [
            ManualReading {
                level_percent: Some(101.0),
                ..Default::default()
            },
            ManualReading {
                total_dissolved_solids_ppm: Some(5001.0),
                ..Default::default()
            },
            ManualReading {
                temperature_celsius: Some(-1.0),
                ..Default::default()
            },
            ManualReading {
                ph: Some(14.5),
                ..Default::default()
            },
            ManualReading {
                ph: Some(f64::NAN),
                ..Default::default()
            },
        ];
        for reading in cases {
            assert!(reading.validate().is_err(), "{reading:?} should be rejected");
        }
    }
}
