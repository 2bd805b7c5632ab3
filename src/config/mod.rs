// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[server]` - Base URL, request timeout and session cookie
//! - `[editor]` - Stage size and zoom step
//! - `[capture]` - Composite mode and webcam readiness retries
//!
//! # Examples
//!
//! ```no_run
//! use snapbooth::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.server.base_url = Some("https://booth.example.org".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

/// Environment variable overriding the configured session cookie.
pub const ENV_SESSION: &str = "SNAPBOOTH_SESSION";

// =============================================================================
// Enums (shared between sections)
// =============================================================================

/// Where the overlay ends up being composited.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CompositeMode {
    /// Upload the base raster plus the overlay box; the server composites.
    #[default]
    Server,
    /// Draw the overlay into the raster locally.
    Client,
}

// =============================================================================
// Section Structs
// =============================================================================

/// Server connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    /// Base URL of the photo-booth server.
    #[serde(default = "default_base_url", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[serde(
        default = "default_request_timeout_secs",
        skip_serializing_if = "Option::is_none"
    )]
    pub timeout_secs: Option<u64>,

    /// Value of the `session` cookie forwarded with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_request_timeout_secs(),
            session: None,
        }
    }
}

impl ServerConfig {
    /// Base URL with any trailing slash removed.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(DEFAULT_SERVER_URL)
            .trim_end_matches('/')
            .to_string()
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    /// Session cookie, preferring `SNAPBOOTH_SESSION` over the file value.
    #[must_use]
    pub fn resolved_session(&self) -> Option<String> {
        match std::env::var(ENV_SESSION) {
            Ok(value) if !value.is_empty() => Some(value),
            _ => self.session.clone().filter(|s| !s.is_empty()),
        }
    }
}

/// Editor stage settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EditorConfig {
    /// On-screen stage width in pixels.
    #[serde(
        default = "default_stage_width",
        skip_serializing_if = "Option::is_none"
    )]
    pub stage_width: Option<f32>,

    /// On-screen stage height in pixels.
    #[serde(
        default = "default_stage_height",
        skip_serializing_if = "Option::is_none"
    )]
    pub stage_height: Option<f32>,

    /// Zoom step percentage for zoom in/out.
    #[serde(default = "default_zoom_step", skip_serializing_if = "Option::is_none")]
    pub zoom_step: Option<f32>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            stage_width: default_stage_width(),
            stage_height: default_stage_height(),
            zoom_step: default_zoom_step(),
        }
    }
}

/// Capture settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CaptureConfig {
    /// Where the overlay is composited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<CompositeMode>,

    /// Delay between readiness retries in milliseconds.
    #[serde(default = "default_retry_ms", skip_serializing_if = "Option::is_none")]
    pub retry_ms: Option<u64>,

    /// Number of readiness retries before the capture is abandoned.
    #[serde(
        default = "default_max_retries",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_retries: Option<u32>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            mode: Some(CompositeMode::default()),
            retry_ms: default_retry_ms(),
            max_retries: default_max_retries(),
        }
    }
}

impl CaptureConfig {
    #[must_use]
    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_ms.unwrap_or(DEFAULT_CAPTURE_RETRY_MS))
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub editor: EditorConfig,

    #[serde(default)]
    pub capture: CaptureConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_base_url() -> Option<String> {
    Some(DEFAULT_SERVER_URL.to_string())
}

fn default_request_timeout_secs() -> Option<u64> {
    Some(DEFAULT_REQUEST_TIMEOUT_SECS)
}

fn default_stage_width() -> Option<f32> {
    Some(DEFAULT_STAGE_WIDTH)
}

fn default_stage_height() -> Option<f32> {
    Some(DEFAULT_STAGE_HEIGHT)
}

fn default_zoom_step() -> Option<f32> {
    Some(DEFAULT_ZOOM_STEP_PERCENT)
}

fn default_retry_ms() -> Option<u64> {
    Some(DEFAULT_CAPTURE_RETRY_MS)
}

fn default_max_retries() -> Option<u32> {
    Some(DEFAULT_CAPTURE_MAX_RETRIES)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    return (
                        Config::default(),
                        Some(format!(
                            "Could not read {}, using defaults: {err}",
                            path.display()
                        )),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
