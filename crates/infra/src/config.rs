//! Configuration loading and representation.
//!
//! Layering, later wins: built-in defaults → optional JSON file → environment
//! (`GROCER_DATA_DIR`, `GROCER_MARKETPLACES`, `GROCER_LOG`). Command-line flags
//! are applied on top by the binary.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_DATA_DIR: &str = "GROCER_DATA_DIR";
pub const ENV_MARKETPLACES: &str = "GROCER_MARKETPLACES";
pub const ENV_LOG: &str = "GROCER_LOG";

/// Upper bound for `marketplace_count`; price comparison opens every file in `1..=count`.
pub const MAX_MARKETPLACES: u32 = 999;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value '{value}' for {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the inventory, marketplace and order files.
    pub data_dir: PathBuf,
    pub inventory_file: String,
    pub order_file: String,
    /// Marketplace file name; `{id}` is replaced by the marketplace number.
    pub marketplace_file_pattern: String,
    /// Marketplaces `1..=marketplace_count` take part in price comparison.
    pub marketplace_count: u32,
    pub expiring_window_days: u64,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            inventory_file: "grocery_items.csv".to_string(),
            order_file: "ordered_items.csv".to_string(),
            marketplace_file_pattern: "Marketplace-{id}.csv".to_string(),
            marketplace_count: 3,
            expiring_window_days: 180,
            log_filter: "warn".to_string(),
        }
    }
}

impl Settings {
    /// Defaults, then `config_file` if given, then the process environment.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match config_file {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };
        let settings = base.with_env(|var| std::env::var(var).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides read through `lookup`.
    pub fn with_env(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_MARKETPLACES) {
            self.marketplace_count = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: ENV_MARKETPLACES,
                value: raw.clone(),
            })?;
        }
        if let Some(filter) = lookup(ENV_LOG) {
            self.log_filter = filter;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inventory_file.trim().is_empty() || self.order_file.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "inventory_file and order_file must be set".to_string(),
            ));
        }
        if self.inventory_file == self.order_file {
            return Err(ConfigError::Invalid(
                "inventory_file and order_file must differ".to_string(),
            ));
        }
        if !self.marketplace_file_pattern.contains("{id}") {
            return Err(ConfigError::Invalid(format!(
                "marketplace_file_pattern '{}' must contain {{id}}",
                self.marketplace_file_pattern
            )));
        }
        if self.marketplace_count == 0 || self.marketplace_count > MAX_MARKETPLACES {
            return Err(ConfigError::Invalid(format!(
                "marketplace_count must be between 1 and {MAX_MARKETPLACES}, got {}",
                self.marketplace_count
            )));
        }
        Ok(())
    }

    pub fn inventory_path(&self) -> PathBuf {
        self.data_dir.join(&self.inventory_file)
    }

    pub fn order_path(&self) -> PathBuf {
        self.data_dir.join(&self.order_file)
    }
}
