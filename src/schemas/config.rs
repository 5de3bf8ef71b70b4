//! Config schema - Configuration for the portal client

use serde::{Deserialize, Serialize};

/// Main configuration for sempro
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Schema version for forward compatibility
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Base URL of the backend, without the `/api` suffix
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u32,

    /// Page size for the security log viewer
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    "http://localhost:3000".to_string()
}

fn default_timeout_seconds() -> u32 {
    30
}

fn default_per_page() -> u32 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Config {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            timeout_seconds: default_timeout_seconds(),
            per_page: default_per_page(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.schema_version, 1);
        assert_eq!(config.api_base_url, "http://localhost:3000");
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.per_page, 10);
    }

    #[test]
    fn test_config_partial_json() {
        // Simulate a config file with only some fields set
        let json = r#"{"api_base_url": "https://seminar.example.ac.id"}"#;
        let parsed: Config = serde_json::from_str(json).unwrap();

        assert_eq!(parsed.api_base_url, "https://seminar.example.ac.id");
        // Other fields should have defaults
        assert_eq!(parsed.timeout_seconds, 30);
        assert_eq!(parsed.per_page, 10);
    }
}
