//! Configuration loading with defaults and environment overrides

use std::path::Path;

use crate::errors::{Result, SemproError};
use crate::fs;
use crate::schemas::Config;

/// Overrides `api_base_url`
pub const API_URL_ENV: &str = "SEMPRO_API_URL";

/// Overrides `timeout_seconds`
pub const TIMEOUT_ENV: &str = "SEMPRO_TIMEOUT_SECONDS";

/// Load configuration from the config directory, falling back to defaults.
///
/// If config.json exists, it will be read and merged with defaults. The
/// `SEMPRO_API_URL` and `SEMPRO_TIMEOUT_SECONDS` environment variables
/// take precedence over the file.
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let config = fs::read_config(config_dir)?;
    let config = apply_overrides(config, |key| std::env::var(key).ok())?;
    tracing::debug!(api = %config.api_base_url, "configuration loaded");
    Ok(config)
}

fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Result<Config> {
    if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
        config.api_base_url = url.trim().to_string();
    }
    if let Some(raw) = lookup(TIMEOUT_ENV) {
        config.timeout_seconds = raw.trim().parse().map_err(|e| {
            SemproError::ConfigError(format!("{} must be a whole number of seconds: {}", TIMEOUT_ENV, e))
        })?;
    }
    if config.timeout_seconds == 0 {
        return Err(SemproError::ConfigError(
            "timeout_seconds must be greater than zero".to_string(),
        ));
    }
    config.api_base_url = config.api_base_url.trim_end_matches('/').to_string();
    Ok(config)
}
