//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\mora\config.toml
//! - macOS: ~/Library/Application Support/mora/config.toml
//! - Linux: ~/.config/mora/config.toml
//!
//! The file is optional and human-editable. The catalog hosts rotate from
//! time to time, so they are overridable here without a rebuild; the
//! download section holds per-user defaults the CLI flags can override.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::domain::Quality;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog endpoint hosts
    pub catalog: CatalogConfig,

    /// Download defaults
    pub download: DownloadConfig,
}

/// Catalog endpoint hosts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Host serving the search endpoint
    pub search_base: String,

    /// Hosts serving the track/manifest endpoint, tried in order
    pub track_bases: Vec<String>,

    /// Host serving cover images
    pub image_base: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            search_base: "https://hifi-two.spotisaver.net".to_string(),
            track_bases: vec![
                "https://hund.qqdl.site".to_string(),
                "https://katze.qqdl.site".to_string(),
            ],
            image_base: "https://resources.tidal.com".to_string(),
        }
    }
}

/// Download defaults, overridable per invocation via CLI flags
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// Default output folder
    pub output: Option<PathBuf>,

    /// Default quality to request
    pub quality: Option<Quality>,
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("mora"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };

    if !path.exists() {
        tracing::debug!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
