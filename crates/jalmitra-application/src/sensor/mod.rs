//! Sensor and alert state.
//!
//! - `snapshot`: the read-only view handed to consumers
//! - `manager`: refresh orchestration and local alert resolution

mod manager;
mod snapshot;

pub use manager::{RefreshOutcome, SensorDataManager};
pub use snapshot::{DataStatus, SensorSnapshot};
