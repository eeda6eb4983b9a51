//! Runtime configuration.
//!
//! On desktop the configuration is read from `<config dir>/hello-triangle/config.json` when
//! that file exists. Every field is optional; missing ones take their default. The browser
//! build always uses the defaults.

use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[cfg(not(target_arch = "wasm32"))]
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[cfg(not(target_arch = "wasm32"))]
    #[error("malformed config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown log level `{0}`")]
    LogLevel(String),
    #[error("pixel ratio must be a finite number above zero, got {0}")]
    PixelRatio(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window title (desktop only).
    pub title: String,
    /// Initial window size in screen coordinates (desktop only).
    pub width: u32,
    pub height: u32,
    /// Multiplier applied to the canvas display size when resizing its drawing buffer (web
    /// only). Desktop windows already report their drawable size in physical pixels.
    pub pixel_ratio: f64,
    /// Use the browser's `devicePixelRatio` instead of `pixel_ratio` (web only).
    pub use_device_pixel_ratio: bool,
    /// `off`, `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Hello, triangle".to_string(),
            width: 800,
            height: 600,
            pixel_ratio: 1.0,
            use_device_pixel_ratio: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.pixel_ratio.is_finite() || self.pixel_ratio <= 0.0 {
            return Err(ConfigError::PixelRatio(self.pixel_ratio));
        }
        self.level_filter()?;
        Ok(())
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|dir| dir.join("hello-triangle").join("config.json"))
    }

    /// Loads the config file, falling back to defaults when there is none.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, ConfigError> {
        match Self::path() {
            Some(path) if path.exists() => Self::from_json(&std::fs::read_to_string(path)?),
            _ => Ok(Self::default()),
        }
    }
}
