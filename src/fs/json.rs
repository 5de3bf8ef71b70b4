//! Stored session and config files
//!
//! `storage.json` holds the token pair and the profile between runs, so a
//! crash mid-write must not leave it half written.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{Result, SemproError};
use crate::schemas::Config;

use super::paths::get_config_path;

/// Load a stored file. A missing file is `FileNotFound`, which the session
/// loader treats as "logged out"; a malformed one is `InvalidJson`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SemproError::FileNotFound(path.display().to_string())
        } else {
            SemproError::Io(e)
        }
    })?;

    serde_json::from_str(&content).map_err(|e| {
        SemproError::InvalidJson(format!("Invalid JSON in file {}: {}", path.display(), e))
    })
}

/// Persist `data` through a sibling `.json.tmp` and a rename.
pub fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let content =
        serde_json::to_string_pretty(data).map_err(|e| SemproError::InvalidJson(e.to_string()))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    file.sync_all()?;
    drop(file);

    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Read the config.json file from the config directory.
///
/// Returns the default configuration if the file doesn't exist.
pub fn read_config(config_dir: &Path) -> Result<Config> {
    let path = get_config_path(config_dir);
    if !path.exists() {
        return Ok(Config::default());
    }
    read_json(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_json_file_not_found() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.json");

        let result: Result<Config> = read_json(&path);
        assert!(matches!(result.unwrap_err(), SemproError::FileNotFound(_)));
    }

    #[test]
    fn test_read_json_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("invalid.json");
        fs::write(&path, "not valid json {").unwrap();

        let result: Result<Config> = read_json(&path);
        assert!(matches!(result.unwrap_err(), SemproError::InvalidJson(_)));
    }

    #[test]
    fn test_write_json_creates_parent_dirs_and_leaves_no_temp() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("dir").join("config.json");

        write_json(&path, &Config::default()).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());

        let read: Config = read_json(&path).unwrap();
        assert_eq!(read, Config::default());
    }

    #[test]
    fn test_read_config_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let config = read_config(temp.path()).unwrap();
        assert_eq!(config, Config::default());
    }
}
