//! Client configuration baked in at build time, overridable at runtime.

use std::path::PathBuf;

use agrilink_core::config::{default_data_dir, ClientConfig, API_URL_ENV};
use agrilink_core::util::normalize_text_option;
use serde::{Deserialize, Serialize};

const SESSION_FILE_NAME: &str = "desktop-session.json";

/// Values embedded into the binary by `build.rs`.
///
/// Only public endpoints belong here; nothing secret is shipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DesktopConfig {
    #[serde(default)]
    pub api_base_url: Option<String>,
}

/// Loads the JSON generated into `OUT_DIR`, falling back to defaults.
pub fn load_desktop_config() -> DesktopConfig {
    let raw = include_str!(concat!(env!("OUT_DIR"), "/desktop-config.json"));
    parse_desktop_config(raw)
}

fn parse_desktop_config(raw: &str) -> DesktopConfig {
    serde_json::from_str(raw).unwrap_or_else(|error| {
        tracing::warn!("Failed to parse desktop config: {}", error);
        DesktopConfig::default()
    })
}

impl DesktopConfig {
    /// The environment wins over the build-time URL so a packaged app can be
    /// pointed at another backend without rebuilding.
    pub fn client_config(&self) -> agrilink_core::Result<ClientConfig> {
        self.client_config_from(std::env::var(API_URL_ENV).ok())
    }

    pub fn client_config_from(&self, from_env: Option<String>) -> agrilink_core::Result<ClientConfig> {
        ClientConfig::resolve_from(
            normalize_text_option(from_env),
            self.api_base_url.clone(),
        )
    }
}

pub fn session_path() -> PathBuf {
    default_data_dir().join(SESSION_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use agrilink_core::config::DEFAULT_API_BASE_URL;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn invalid_json_falls_back_to_default() {
        assert_eq!(parse_desktop_config("not json"), DesktopConfig::default());
        assert_eq!(
            parse_desktop_config(r#"{"api_base_url":"https://api.example.com/api"}"#)
                .api_base_url
                .as_deref(),
            Some("https://api.example.com/api")
        );
    }

    #[test]
    fn env_overrides_baked_url() {
        let config = DesktopConfig {
            api_base_url: Some("https://baked.example.com/api".to_string()),
        };

        let from_env = config
            .client_config_from(Some("https://env.example.com/api/".to_string()))
            .unwrap();
        assert_eq!(from_env.api_base_url, "https://env.example.com/api");

        let baked = config.client_config_from(Some("  ".to_string())).unwrap();
        assert_eq!(baked.api_base_url, "https://baked.example.com/api");
    }

    #[test]
    fn unset_everything_uses_default() {
        let config = DesktopConfig::default().client_config_from(None).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }
}
