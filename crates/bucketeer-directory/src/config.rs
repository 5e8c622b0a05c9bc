//! Settings for the directory client

use crate::DirectoryError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default directory API
pub const DEFAULT_ENDPOINT: &str = "https://dummyjson.com";

/// Default number of users requested
pub const DEFAULT_LIMIT: u32 = 100;

/// Default request timeout (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per fetch
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Where to fetch users from and how hard to try
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// API base URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Users requested per fetch
    #[serde(default = "default_limit")]
    pub limit: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Attempts before giving up
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            limit: default_limit(),
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
        }
    }
}

impl DirectoryConfig {
    /// Request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check the settings are usable
    pub fn validate(&self) -> Result<(), DirectoryError> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(DirectoryError::Config(format!(
                "endpoint must be an http(s) URL, got '{}'",
                self.endpoint
            )));
        }
        if self.limit == 0 {
            return Err(DirectoryError::Config("limit must be at least 1".to_string()));
        }
        if self.max_retries == 0 {
            return Err(DirectoryError::Config(
                "max_retries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DirectoryConfig::default();
        assert_eq!(config.endpoint, "https://dummyjson.com");
        assert_eq!(config.limit, 100);
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json() {
        let config: DirectoryConfig = serde_json::from_str(r#"{"limit": 10}"#).unwrap();
        assert_eq!(config.limit, 10);
        assert_eq!(config.max_retries, 3);
    }

    #[test]
    fn test_validate() {
        let bad_url = DirectoryConfig {
            endpoint: "ftp://example.com".to_string(),
            ..Default::default()
        };
        assert!(bad_url.validate().is_err());

        let no_users = DirectoryConfig {
            limit: 0,
            ..Default::default()
        };
        assert!(no_users.validate().is_err());
    }
}
