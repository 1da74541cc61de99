//! Raw configuration data types
//!
//! [`FileConfig`] mirrors the TOML file (and the `MINIFLUX_*` environment
//! variables) exactly. [`FileConfig::validate`] turns it into the
//! [`MinifluxSettings`] the HTTP client is built from.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("MINIFLUX_URL (or `url` in the config file) is required")]
    MissingUrl,

    #[error("invalid Miniflux URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error(
        "either MINIFLUX_API_KEY or both MINIFLUX_USERNAME and MINIFLUX_PASSWORD must be set"
    )]
    MissingCredentials,

    #[error("timeout_seconds cannot be 0")]
    InvalidTimeout,
}

/// Raw configuration from TOML files and the environment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FileConfig {
    /// Base URL of the Miniflux instance
    pub url: Option<String>,
    /// API token; takes precedence over username/password
    pub api_key: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Per-request timeout
    pub timeout_seconds: u64,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            username: None,
            password: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// How requests authenticate against the remote service
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    ApiKey(String),
    Basic { username: String, password: String },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::ApiKey(_) => f.write_str("ApiKey(***)"),
            Credentials::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"***")
                .finish(),
        }
    }
}

/// Validated connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinifluxSettings {
    pub base_url: Url,
    pub credentials: Credentials,
    pub timeout: Duration,
}

/// The value as written, unless it is empty or only whitespace
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

impl FileConfig {
    /// Validate into connection settings.
    ///
    /// Empty or whitespace-only strings are treated as unset; any other
    /// credential is kept byte for byte.
    pub fn validate(&self) -> Result<MinifluxSettings, ConfigValidationError> {
        let raw_url = present(&self.url).ok_or(ConfigValidationError::MissingUrl)?;
        let base_url = Url::parse(raw_url).map_err(|e| ConfigValidationError::InvalidUrl {
            url: raw_url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ConfigValidationError::InvalidUrl {
                url: raw_url.to_string(),
                reason: "scheme must be http or https".to_string(),
            });
        }

        let credentials = match (
            present(&self.api_key),
            present(&self.username),
            present(&self.password),
        ) {
            (Some(key), _, _) => Credentials::ApiKey(key.to_string()),
            (None, Some(username), Some(password)) => Credentials::Basic {
                username: username.to_string(),
                password: password.to_string(),
            },
            _ => return Err(ConfigValidationError::MissingCredentials),
        };

        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        Ok(MinifluxSettings {
            base_url,
            credentials,
            timeout: Duration::from_secs(self.timeout_seconds),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> FileConfig {
        FileConfig {
            url: Some(url.to_string()),
            api_key: Some("secret-token".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_timeout() {
        assert_eq!(FileConfig::default().timeout_seconds, 30);
    }

    #[test]
    fn test_api_key_wins_over_basic() {
        let config = FileConfig {
            username: Some("admin".to_string()),
            password: Some("hunter2".to_string()),
            ..with_url("https://reader.example.org")
        };

        let settings = config.validate().unwrap();
        assert_eq!(settings.credentials, Credentials::ApiKey("secret-token".to_string()));
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.base_url.as_str(), "https://reader.example.org/");
    }

    #[test]
    fn test_basic_credentials() {
        let config = FileConfig {
            url: Some("http://localhost:8080".to_string()),
            username: Some("admin".to_string()),
            password: Some("hunter2".to_string()),
            ..Default::default()
        };

        assert_eq!(
            config.validate().unwrap().credentials,
            Credentials::Basic {
                username: "admin".to_string(),
                password: "hunter2".to_string(),
            }
        );
    }

    #[test]
    fn test_credentials_are_not_trimmed() {
        let config = FileConfig {
            url: Some("https://reader.example.org".to_string()),
            username: Some("admin".to_string()),
            password: Some(" pass word ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.validate().unwrap().credentials,
            Credentials::Basic {
                username: "admin".to_string(),
                password: " pass word ".to_string(),
            }
        );

        let settings = with_url("https://reader.example.org");
        let config = FileConfig {
            api_key: Some("token-with-space ".to_string()),
            ..settings
        };
        assert_eq!(
            config.validate().unwrap().credentials,
            Credentials::ApiKey("token-with-space ".to_string())
        );
    }

    #[test]
    fn test_missing_url() {
        let config = FileConfig {
            url: Some("  ".to_string()),
            api_key: Some("secret-token".to_string()),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigValidationError::MissingUrl));
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            with_url("not a url").validate(),
            Err(ConfigValidationError::InvalidUrl { .. })
        ));
        assert!(matches!(
            with_url("ftp://reader.example.org").validate(),
            Err(ConfigValidationError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_incomplete_basic_credentials() {
        let config = FileConfig {
            url: Some("https://reader.example.org".to_string()),
            username: Some("admin".to_string()),
            password: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigValidationError::MissingCredentials));
    }

    #[test]
    fn test_zero_timeout() {
        let config = FileConfig {
            timeout_seconds: 0,
            ..with_url("https://reader.example.org")
        };
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let debug = format!("{:?}", Credentials::ApiKey("secret-token".to_string()));
        assert!(!debug.contains("secret-token"));
    }
}
