//! Well sensor domain module.
//!
//! # Module Structure
//!
//! - `model`: readings, usage summary, alerts
//! - `classify`: level status classification
//! - `manual`: farmer-entered readings for wells without connectivity
//! - `source`: the data source port the sensor container refreshes from

mod classify;
mod manual;
mod model;
mod source;

pub use classify::{MODERATE_LEVEL_THRESHOLD, SAFE_LEVEL_THRESHOLD, classify_level};
pub use manual::ManualReading;
pub use model::{Alert, AlertFilter, AlertType, LevelStatus, Location, UsageSummary, WellReading};
pub use source::SensorDataSource;
