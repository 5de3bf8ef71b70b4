//! Path resolution utilities for sempro
//!
//! Locates the directory holding `config.json` and the persisted session.

use std::path::{Path, PathBuf};

/// Environment variable that overrides the config directory
pub const HOME_ENV: &str = "SEMPRO_HOME";

/// Directory name used when nothing else is configured
pub const DEFAULT_DIR_NAME: &str = ".sempro";

/// Resolve the config directory.
///
/// Precedence: explicit override, then `SEMPRO_HOME`, then `./.sempro`.
pub fn resolve_config_dir(override_dir: Option<&Path>) -> PathBuf {
    if let Some(path) = override_dir {
        return path.to_path_buf();
    }
    match std::env::var_os(HOME_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(DEFAULT_DIR_NAME),
    }
}

/// Get the path to the config.json file.
pub fn get_config_path(config_dir: &Path) -> PathBuf {
    config_dir.join("config.json")
}

/// Get the path to the persisted session (token, refreshToken, userData).
pub fn get_storage_path(config_dir: &Path) -> PathBuf {
    config_dir.join("storage.json")
}
