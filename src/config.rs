// src/config.rs

//! Defines the configuration structures for the `escher` viewer.
//!
//! Every section carries `#[serde(default)]`, so a configuration file only
//! needs to name the values it changes. The file is JSON and is located
//! through the `ESCHER_CONFIG` environment variable; without it the defaults
//! below apply.

use crate::error::{EscherError, Result};
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an optional JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "ESCHER_CONFIG";

/// Process-wide configuration, loaded on first access.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::load_or_default);

// --- Top-Level Configuration Structure ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Parameter steps and initial spiral coefficients.
    pub controls: ControlsConfig,
    /// Where rendered frames are written.
    pub output: OutputConfig,
    /// Main loop pacing.
    pub performance: PerformanceConfig,
    /// Window appearance.
    pub window: WindowConfig,
}

impl Config {
    /// Parse a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| EscherError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Load from `$ESCHER_CONFIG` if set. Errors fall back to defaults.
    pub fn load_or_default() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Config::default();
        };
        let path = PathBuf::from(path);
        match Config::load(&path) {
            Ok(config) => {
                info!("Configuration loaded from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{}; using default configuration", e);
                Config::default()
            }
        }
    }
}

// --- Controls ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Amount added to or removed from alpha per key press.
    pub alpha_step: f64,
    /// Amount added to or removed from beta per key press.
    pub beta_step: f64,
    pub initial_alpha: f64,
    pub initial_beta: f64,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        ControlsConfig {
            alpha_step: 0.1,
            beta_step: 0.1,
            initial_alpha: 1.0,
            initial_beta: 0.0,
        }
    }
}

// --- Output ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Overwritten after every render.
    pub path: PathBuf,
    /// Set to false to only display results.
    pub enabled: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: PathBuf::from("escher.bmp"),
            enabled: true,
        }
    }
}

// --- Performance ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Sleep between event-loop ticks, in milliseconds.
    pub tick_interval_ms: u64,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        PerformanceConfig {
            tick_interval_ms: 25,
        }
    }
}

// --- Window ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            title: "Escher".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "controls": { "alpha_step": 0.25 } }"#).unwrap();
        assert_eq!(config.controls.alpha_step, 0.25);
        assert_eq!(config.controls.beta_step, 0.1);
        assert_eq!(config.output.path, PathBuf::from("escher.bmp"));
        assert_eq!(config.performance.tick_interval_ms, 25);
        assert_eq!(config.window.title, "Escher");
    }

    #[test]
    fn load_reports_missing_file() {
        let path = std::env::temp_dir().join("escher-config-that-does-not-exist.json");
        assert!(matches!(
            Config::load(&path),
            Err(EscherError::ConfigRead { .. })
        ));
    }

    #[test]
    fn load_reports_malformed_json() {
        let path = std::env::temp_dir().join(format!("escher-config-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let result = Config::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(EscherError::ConfigParse(_))));
    }
}
