//! Application settings file.
//!
//! Settings live in `<config dir>/hotasbind/settings.toml`. A missing file is
//! created with defaults on first start; a broken one is reported and replaced
//! by defaults in memory so the application still starts.

use color_eyre::{eyre::eyre, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::binding::actions::ActionFilter;

const APP_DIR: &str = "hotasbind";
const SETTINGS_FILE: &str = "settings.toml";
const DEFAULT_REPAINT_INTERVAL_MS: u64 = 16;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Detect hat switches that jump straight to a discrete position
    pub hat_mode: bool,
    /// Rows shown in the action list
    pub list_filter: ActionFilter,
    /// Folder the export dialog opens in
    pub export_dir: Option<PathBuf>,
    /// Frame cadence, one sampler tick per frame
    pub repaint_interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hat_mode: false,
            list_filter: ActionFilter::All,
            export_dir: None,
            repaint_interval_ms: DEFAULT_REPAINT_INTERVAL_MS,
        }
    }
}

impl AppConfig {
    pub fn repaint_interval(&self) -> Duration {
        Duration::from_millis(self.repaint_interval_ms.max(1))
    }

    pub fn default_path() -> Result<PathBuf> {
        let mut path =
            dirs::config_dir().ok_or_else(|| eyre!("Could not determine config directory"))?;
        path.push(APP_DIR);
        path.push(SETTINGS_FILE);
        Ok(path)
    }

    /// Loads the settings at `path`, writing defaults when the file does not
    /// exist yet.
    pub async fn load_or_init_at(path: &Path) -> Self {
        match tokio::fs::try_exists(path).await {
            Ok(true) => match Self::load(path).await {
                Ok(config) => config,
                Err(e) => {
                    warn!("Settings at {} unusable, using defaults: {}", path.display(), e);
                    Self::default()
                }
            },
            Ok(false) => {
                let config = Self::default();
                if let Err(e) = config.save(path).await {
                    warn!("Could not write default settings: {}", e);
                }
                config
            }
            Err(e) => {
                warn!("Could not check settings file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| eyre!("Failed to read settings file: {}", e))?;
        let config = toml::from_str(&content)
            .map_err(|e| eyre!("Failed to parse settings file: {}", e))?;
        debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| eyre!("Failed to create settings directory: {}", e))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| eyre!("Failed to serialize settings: {}", e))?;
        tokio::fs::write(path, content)
            .await
            .map_err(|e| eyre!("Failed to write settings file: {}", e))?;

        info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn first_start_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);

        let config = AppConfig::load_or_init_at(&path).await;
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());
        assert_eq!(AppConfig::load(&path).await.unwrap(), config);
    }

    #[tokio::test]
    async fn saved_settings_are_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        let config = AppConfig {
            hat_mode: true,
            list_filter: ActionFilter::Unconfigured,
            export_dir: Some(dir.path().to_path_buf()),
            repaint_interval_ms: 33,
        };

        config.save(&path).await.unwrap();
        assert_eq!(AppConfig::load_or_init_at(&path).await, config);
    }

    #[tokio::test]
    async fn broken_file_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        tokio::fs::write(&path, "hat_mode = \"maybe\"").await.unwrap();

        assert!(AppConfig::load(&path).await.is_err());
        assert_eq!(AppConfig::load_or_init_at(&path).await, AppConfig::default());
    }

    #[tokio::test]
    async fn missing_keys_take_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        tokio::fs::write(&path, "hat_mode = true\n").await.unwrap();

        let config = AppConfig::load(&path).await.unwrap();
        assert!(config.hat_mode);
        assert_eq!(config.repaint_interval_ms, DEFAULT_REPAINT_INTERVAL_MS);
        assert_eq!(config.list_filter, ActionFilter::All);
    }
}
