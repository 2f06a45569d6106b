//! Configuration management for Boatyard
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    APP_NAME, CONFIG_FILE_NAME, CONFIG_GENERATED, DEFAULT_TOAST_SECONDS, TOAST_MAX_SECONDS, TOAST_MIN_SECONDS,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub map: MapConfig,
    pub catalog: CatalogConfig,
    pub notifications: NotificationsConfig,
    pub logging: LoggingConfig,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Boat type the results open with ("" = all types)
    pub default_boat_type: String,
    /// View shown on startup
    /// Options: "gallery", "editor"
    pub start_view: String,
    /// Enable mouse support
    pub mouse_enabled: bool,
}

/// Map configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Pin the map to a single boat; when set the map ignores broadcast selections
    pub record_id: Option<String>,
    /// World map detail
    /// Options: "low", "high"
    pub resolution: String,
}

/// Catalog storage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// Database URL; an in-memory SQLite database is used when unset
    pub database_url: Option<String>,
    /// JSON file with boat types and boats used to seed an empty catalog
    pub seed_file: Option<PathBuf>,
}

/// Toast configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationsConfig {
    /// How long a toast stays visible, in seconds
    pub toast_seconds: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging
    pub enabled: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_boat_type: String::new(),
            start_view: "gallery".to_string(),
            mouse_enabled: false,
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            record_id: None,
            resolution: "low".to_string(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            toast_seconds: DEFAULT_TOAST_SECONDS,
        }
    }
}

impl NotificationsConfig {
    pub fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.toast_seconds)
    }
}

impl MapConfig {
    /// Fixed record id, treating an empty string as unset
    pub fn fixed_record_id(&self) -> Option<&str> {
        self.record_id.as_deref().filter(|id| !id.trim().is_empty())
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join(APP_NAME).join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let valid_views = ["gallery", "editor"];
        if !valid_views.contains(&self.ui.start_view.as_str()) {
            anyhow::bail!(
                "start_view must be one of {}, got '{}'",
                valid_views.join(", "),
                self.ui.start_view
            );
        }

        let valid_resolutions = ["low", "high"];
        if !valid_resolutions.contains(&self.map.resolution.as_str()) {
            anyhow::bail!(
                "map resolution must be one of {}, got '{}'",
                valid_resolutions.join(", "),
                self.map.resolution
            );
        }

        if self.notifications.toast_seconds < TOAST_MIN_SECONDS || self.notifications.toast_seconds > TOAST_MAX_SECONDS
        {
            anyhow::bail!(
                "toast_seconds must be between {} and {}, got {}",
                TOAST_MIN_SECONDS,
                TOAST_MAX_SECONDS,
                self.notifications.toast_seconds
            );
        }

        if let Some(seed_file) = &self.catalog.seed_file {
            if !seed_file.exists() {
                anyhow::bail!("seed_file '{}' does not exist", seed_file.display());
            }
        }

        if let Some(url) = &self.catalog.database_url {
            if !url.starts_with("sqlite:") {
                anyhow::bail!("database_url must be a sqlite URL, got '{}'", url);
            }
        }

        Ok(())
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        let header = format!(
            "# Boatyard Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(APP_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
