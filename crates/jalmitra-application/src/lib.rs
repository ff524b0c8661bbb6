//! Application layer for Jalmitra.
//!
//! Holds the state containers consumers read snapshots from and send
//! commands to:
//!
//! - [`SessionManager`]: sign-in state, durable across restarts
//! - [`FarmerProfileManager`]: the single active farmer profile
//! - [`SensorDataManager`]: reading, usage and alerts for the assigned well
//!
//! [`AppContext`] builds all three and keeps the sensor container following
//! the profile's assigned well.

pub mod app_context;
pub mod farmer_profile_manager;
pub mod sensor;
pub mod session_manager;

pub use app_context::AppContext;
pub use farmer_profile_manager::FarmerProfileManager;
pub use sensor::{DataStatus, RefreshOutcome, SensorDataManager, SensorSnapshot};
pub use session_manager::SessionManager;
