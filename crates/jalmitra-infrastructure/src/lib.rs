//! Adapters for the Jalmitra ports: durable storage, the simulated sensor
//! backend, mock sign-in, filesystem paths and config loading.

pub mod config_service;
pub mod mock_auth;
pub mod mock_source;
pub mod paths;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::mock_auth::MockAuthenticator;
pub use crate::mock_source::MockSensorDataSource;
pub use crate::storage::{FileKeyValueStore, MemoryKeyValueStore};
