//! Configuration loading

mod loader;

pub use loader::{load_config, API_URL_ENV, TIMEOUT_ENV};
