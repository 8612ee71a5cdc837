//! Client configuration shared by the CLI and desktop apps.
//!
//! The only required value is the backend API base URL. It resolves from an
//! explicit value first, then `AGRILINK_API_URL`, then the local default.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::{is_http_url, normalize_text_option};

/// Environment variable holding the backend API base URL.
pub const API_URL_ENV: &str = "AGRILINK_API_URL";

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

const APP_DIR_NAME: &str = "agrilink";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Builds a config for an explicit API base URL.
    pub fn new(api_base_url: impl AsRef<str>) -> Result<Self> {
        Ok(Self {
            api_base_url: normalize_base_url(api_base_url.as_ref())?,
        })
    }

    /// Resolves the API base URL from an explicit value, the environment or
    /// the built-in default, in that order.
    pub fn resolve(explicit: Option<String>) -> Result<Self> {
        let from_env = std::env::var(API_URL_ENV).ok();
        Self::resolve_from(explicit, from_env)
    }

    /// Same as [`ClientConfig::resolve`] with the environment value passed in.
    pub fn resolve_from(explicit: Option<String>, from_env: Option<String>) -> Result<Self> {
        match normalize_text_option(explicit).or_else(|| normalize_text_option(from_env)) {
            Some(url) => Self::new(url),
            None => Ok(Self::default()),
        }
    }

    /// Joins an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

/// Validates and trims an API base URL.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let base = raw.trim().trim_end_matches('/').to_string();
    if base.is_empty() {
        return Err(Error::Config("API base URL must not be empty".to_string()));
    }
    if !is_http_url(&base) {
        return Err(Error::Config(
            "API base URL must include http:// or https://".to_string(),
        ));
    }
    Ok(base)
}

/// Directory for persisted client data (session files).
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Directory for client configuration files.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_prefers_explicit_then_env_then_default() {
        let explicit = ClientConfig::resolve_from(
            Some("https://api.example.com/api/".to_string()),
            Some("https://env.example.com/api".to_string()),
        )
        .unwrap();
        assert_eq!(explicit.api_base_url, "https://api.example.com/api");

        let env = ClientConfig::resolve_from(
            Some("   ".to_string()),
            Some("https://env.example.com/api".to_string()),
        )
        .unwrap();
        assert_eq!(env.api_base_url, "https://env.example.com/api");

        let fallback = ClientConfig::resolve_from(None, None).unwrap();
        assert_eq!(fallback.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn new_rejects_missing_scheme() {
        let error = ClientConfig::new("localhost:5000/api").unwrap_err();
        assert!(error.to_string().contains("http:// or https://"));
    }

    #[test]
    fn endpoint_joins_paths_without_double_slash() {
        let config = ClientConfig::default();
        assert_eq!(
            config.endpoint("/auth/login"),
            "http://localhost:5000/api/auth/login"
        );
        assert_eq!(
            config.endpoint("admin/products"),
            "http://localhost:5000/api/admin/products"
        );
    }
}
