//! Application Configuration
//! Optional `gcapricorn.toml` in the working directory; every key has a default.

use crate::data::{default_class_priority, HPA_DATASET_URL};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

pub const CONFIG_FILE: &str = "gcapricorn.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dataset_url: String,
    /// Highest priority first.
    pub class_priority: Vec<String>,
    pub default_class_selection: Vec<String>,
    pub request_timeout_secs: u64,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_url: HPA_DATASET_URL.to_string(),
            class_priority: default_class_priority(),
            default_class_selection: vec!["Enzymes".to_string()],
            request_timeout_secs: 300,
            window_width: 1400.0,
            window_height: 900.0,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Read `path`; a missing file yields the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Load the working-directory config, falling back to defaults on error.
    pub fn load() -> Self {
        let path = Path::new(CONFIG_FILE);
        match Self::from_file(path) {
            Ok(config) => {
                if path.exists() {
                    info!(path = CONFIG_FILE, "loaded configuration");
                }
                config
            }
            Err(e) => {
                warn!(path = CONFIG_FILE, error = %e, "ignoring configuration");
                Self::default()
            }
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
