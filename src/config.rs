//! TOML configuration file support.
//!
//! Instead of passing flags on every invocation, defaults can live in a
//! config file:
//!
//! ```toml
//! # glucosense.toml
//! [metrics]
//! start_glucose = 0.0
//! end_glucose = 1000.0
//!
//! [storage]
//! data_dir = "/var/lib/glucosense"
//! key_prefix = "ag_bp_"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Root configuration structure for glucosense.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Metric reference defaults.
    #[serde(default)]
    pub metrics: MetricsConfig,

    /// Persistence settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Default glucose reference levels for metric computation.
#[derive(Debug, Default, Deserialize)]
pub struct MetricsConfig {
    /// Start reference level in mg/dL (default 0).
    pub start_glucose: Option<f64>,

    /// End reference level in mg/dL (default 1000).
    pub end_glucose: Option<f64>,
}

/// Settings for the file-backed repository.
#[derive(Debug, Default, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the persisted JSON files.
    pub data_dir: Option<PathBuf>,

    /// Filename prefix for repository keys.
    pub key_prefix: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let toml = r#"
            [metrics]
            start_glucose = 72.0
            end_glucose = 600.0

            [storage]
            data_dir = "/tmp/glucosense"
            key_prefix = "lab7_"
        "#;

        let config = Config::from_str(toml).unwrap();
        assert_eq!(config.metrics.start_glucose, Some(72.0));
        assert_eq!(config.metrics.end_glucose, Some(600.0));
        assert_eq!(
            config.storage.data_dir.as_deref(),
            Some(Path::new("/tmp/glucosense"))
        );
        assert_eq!(config.storage.key_prefix.as_deref(), Some("lab7_"));
    }

    #[test]
    fn test_empty_config() {
        let config = Config::from_str("").unwrap();
        assert!(config.metrics.start_glucose.is_none());
        assert!(config.storage.data_dir.is_none());
    }
}
