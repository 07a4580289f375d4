use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{store::DEFAULT_STORAGE_KEY, storage::StorageKind};

const DEFAULT_LOG_LEVEL: &str = "warn";

/// Where and under which key the card collection is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend name, "file" or "memory".
    pub backend: String,

    /// Overrides the platform data directory used by the file backend.
    pub data_dir: Option<PathBuf>,

    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageKind::File.as_str().to_string(),
            data_dir: None,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// log_level = "info"
///
/// [storage]
/// backend = "file"
/// key = "weatherCards"
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Default tracing filter when `RUST_LOG` is not set.
    pub log_level: Option<String>,

    pub storage: StorageConfig,
}

impl Config {
    /// Return the storage backend as a strongly-typed StorageKind.
    pub fn storage_kind(&self) -> Result<StorageKind> {
        StorageKind::try_from(self.storage.backend.as_str())
    }

    pub fn set_storage_kind(&mut self, kind: StorageKind) {
        self.storage.backend = kind.as_str().to_string();
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Directory for the file backend: the configured override, or the
    /// platform data directory.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.storage.data_dir {
            return Ok(dir.clone());
        }

        Ok(Self::project_dirs()?.data_dir().to_path_buf())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "weather-cards", "weather-cards")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))
    }
}
