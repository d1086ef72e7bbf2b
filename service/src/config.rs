//! Economy configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use pedal_types::EconomyParams;

use crate::error::EconomyError;

/// Configuration for a Pedal economy service.
///
/// Can be loaded from a TOML file via [`EconomyConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EconomyConfig {
    /// Directory for state snapshots.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Economy parameters (deposit, fee rate, premium, retention, ratio).
    /// Amounts are u128 raw units, which TOML cannot represent; params are
    /// set programmatically, not from the config file.
    #[serde(skip)]
    pub params: EconomyParams,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

pub(crate) fn default_data_dir() -> PathBuf {
    PathBuf::from("./pedal_data")
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl EconomyConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, EconomyError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| EconomyError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, EconomyError> {
        toml::from_str(s).map_err(|e| EconomyError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("EconomyConfig is always serializable to TOML")
    }

    /// Initialize tracing from `log_format` and `log_level`. Idempotent.
    pub fn init_logging(&self) {
        pedal_utils::init_tracing_config(&self.log_format, &self.log_level);
    }
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            params: EconomyParams::default(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
