//! Loads `AppConfig` from disk.

use jalmitra_core::config::AppConfig;
use jalmitra_core::error::{JalmitraError, Result};
use std::path::{Path, PathBuf};

use crate::paths::JalmitraPaths;

pub struct ConfigService;

impl ConfigService {
    /// Loads the config from its default location.
    pub async fn load() -> Result<AppConfig> {
        let path = JalmitraPaths::config_file()?;
        Self::load_from(&path).await
    }

    /// A missing or blank file yields defaults; malformed TOML is a `Config` error.
    pub async fn load_from(path: &Path) -> Result<AppConfig> {
        let content = match tokio::fs::read_to_string(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(?path, "no config file, using defaults");
                return Ok(AppConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(AppConfig::default());
        }

        toml::from_str(&content)
            .map_err(|e| JalmitraError::config(format!("invalid config {}: {}", path.display(), e)))
    }

    /// Where the durable store lives for `config`.
    pub fn storage_path(config: &AppConfig) -> Result<PathBuf> {
        match &config.storage.path {
            Some(path) => Ok(path.clone()),
            None => Ok(JalmitraPaths::storage_file()?),
        }
    }
}
