//! File system utilities for sempro
//!
//! Provides path resolution and JSON file operations.

mod json;
mod paths;

pub use json::{read_config, read_json, write_json};
pub use paths::{get_config_path, get_storage_path, resolve_config_dir, DEFAULT_DIR_NAME, HOME_ENV};
