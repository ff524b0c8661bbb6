//! Filesystem locations used by Jalmitra.
//!
//! ```text
//! ~/.config/jalmitra/          # dirs::config_dir() on Linux
//! ├── config.toml              # AppConfig
//! └── storage.toml             # durable key-value store
//! ```

use std::path::PathBuf;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "JALMITRA_CONFIG";

const APP_DIR: &str = "jalmitra";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// No per-user config directory on this platform.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find the user config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for jalmitra_core::JalmitraError {
    fn from(err: PathError) -> Self {
        jalmitra_core::JalmitraError::config(err.to_string())
    }
}

pub struct JalmitraPaths;

impl JalmitraPaths {
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// `$JALMITRA_CONFIG`, or `config.toml` in the config directory.
    pub fn config_file() -> Result<PathBuf, PathError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
            _ => Ok(Self::config_dir()?.join("config.toml")),
        }
    }

    pub fn storage_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("storage.toml"))
    }
}
