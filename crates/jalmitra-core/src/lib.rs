//! Domain layer for Jalmitra.
//!
//! Models, the error taxonomy, configuration, and the ports (storage, sensor
//! data, sign-in, time) that the application layer is written against.

pub mod auth;
pub mod clock;
pub mod config;
pub mod error;
pub mod farmer;
pub mod sensor;
pub mod session;
pub mod storage;

pub use error::{JalmitraError, Result};
