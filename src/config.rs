//! Application configuration
//! Endpoint and sampling settings, loaded from an optional JSON file.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/simulate";
pub const DEFAULT_SAMPLE_COUNT: usize = 1000;
pub const DEFAULT_SAMPLE_STEP: f64 = 0.1;

const CONFIG_ENV: &str = "SIMVIEW_CONFIG";
const ENDPOINT_ENV: &str = "SIMVIEW_ENDPOINT";
const CONFIG_FILE: &str = "simview.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("sample_count must be at least 1")]
    ZeroSamples,
    #[error("sample_step must be a positive number, got {0}")]
    BadStep(f64),
}

/// Runtime settings for the viewer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Simulation endpoint receiving the constants payload.
    pub endpoint: String,
    pub sample_count: usize,
    pub sample_step: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            sample_count: DEFAULT_SAMPLE_COUNT,
            sample_step: DEFAULT_SAMPLE_STEP,
        }
    }
}

impl AppConfig {
    /// Resolve the config from `SIMVIEW_CONFIG`, then `simview.json`, then
    /// defaults. `SIMVIEW_ENDPOINT` overrides the endpoint in every case.
    pub fn load() -> Result<Self, ConfigError> {
        let explicit = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let mut config = match explicit {
            Some(path) => Self::from_file(&path)?,
            None if Path::new(CONFIG_FILE).exists() => Self::from_file(Path::new(CONFIG_FILE))?,
            None => Self::default(),
        };

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                config.endpoint = endpoint.trim().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sample_count == 0 {
            return Err(ConfigError::ZeroSamples);
        }
        if !(self.sample_step.is_finite() && self.sample_step > 0.0) {
            return Err(ConfigError::BadStep(self.sample_step));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_service() {
        let config = AppConfig::default();
        assert_eq!(config.endpoint, "http://127.0.0.1:8000/simulate");
        assert_eq!(config.sample_count, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_remaining_defaults() {
        let config = AppConfig::from_json(r#"{ "sample_count": 100 }"#).unwrap();
        assert_eq!(config.sample_count, 100);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.sample_step, DEFAULT_SAMPLE_STEP);
    }

    #[test]
    fn rejects_degenerate_grid() {
        let zero = AppConfig {
            sample_count: 0,
            ..AppConfig::default()
        };
        assert!(matches!(zero.validate(), Err(ConfigError::ZeroSamples)));

        let negative = AppConfig {
            sample_step: -0.1,
            ..AppConfig::default()
        };
        assert!(matches!(negative.validate(), Err(ConfigError::BadStep(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppConfig::from_file(Path::new("/nonexistent/simview.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/simview.json"));
    }
}
