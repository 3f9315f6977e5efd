//! # Configuration
//!
//! Optional TOML file overriding the policy constants and report sections.
//!
//! ```toml
//! [policy]
//! inefficiency_threshold_kwh = 500.0
//! electricity_cost_per_kwh = 0.10
//!
//! [report]
//! include_formulas = true
//! include_feedback_prompt = true
//! ```
//!
//! ## Environment Variables
//!
//! - `WATTWISE_CONFIG`: config path used when `--config` is not given

use crate::report::ReportOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use wattwise_core::{Policy, WattwiseError};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "WATTWISE_CONFIG";

/// Maximum config file size (64 KB).
const MAX_CONFIG_FILE_SIZE: u64 = 64 * 1024;

/// Application configuration. Every field has a default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub policy: Policy,
    pub report: ReportOptions,
}

impl AppConfig {
    /// Parse and check a TOML document.
    pub fn from_toml(text: &str) -> Result<Self, WattwiseError> {
        let config: AppConfig =
            toml::from_str(text).map_err(|e| WattwiseError::Config(e.to_string()))?;
        config.policy.validate()?;
        Ok(config)
    }

    /// Load the config from `path`, or defaults when there is none.
    pub fn load(path: Option<&Path>) -> Result<Self, WattwiseError> {
        let Some(path) = path else {
            tracing::debug!("No config file, using defaults");
            return Ok(Self::default());
        };

        let metadata = std::fs::metadata(path).map_err(|e| {
            WattwiseError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(WattwiseError::Config(format!(
                "Config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            WattwiseError::Config(format!("Cannot read '{}': {}", path.display(), e))
        })?;

        let config = Self::from_toml(&text)?;
        tracing::info!(
            "Loaded config from {:?} (threshold {} kWh, cost {} per kWh)",
            path,
            config.policy.inefficiency_threshold_kwh,
            config.policy.electricity_cost_per_kwh
        );
        Ok(config)
    }
}

/// The config path: the CLI flag wins over `WATTWISE_CONFIG`.
pub fn resolve_config_path(cli_path: Option<PathBuf>) -> Option<PathBuf> {
    cli_path.or_else(|| {
        std::env::var_os(CONFIG_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
    })
}
