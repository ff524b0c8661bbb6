//! Farmer profile domain module.
//!
//! # Module Structure
//!
//! - `model`: the farmer profile record, its locale and unit enums, and the
//!   built-in default profile

mod model;

pub use model::{FarmerProfile, Language, MeasurementUnits, PROFILE_STORAGE_KEY};
