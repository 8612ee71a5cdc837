//! Persistent CLI profile configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use agrilink_core::config::{default_config_dir, default_data_dir, ClientConfig};
use agrilink_core::util::normalize_text_option;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "cli-config.json";
pub const PROFILE_ENV: &str = "AGRILINK_PROFILE";
pub const DEFAULT_PROFILE: &str = "default";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliProfilesConfig {
    #[serde(default = "default_config_version")]
    pub version: u32,
    #[serde(default)]
    pub active_profile: Option<String>,
    #[serde(default)]
    pub profiles: BTreeMap<String, CliProfile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CliProfile {
    #[serde(default)]
    pub api_base_url: Option<String>,
}

const fn default_config_version() -> u32 {
    1
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join(CONFIG_FILE_NAME)
}

/// Session file for a profile. Each profile keeps its own token and user.
pub fn session_path(profile_name: &str) -> PathBuf {
    session_path_in(&default_data_dir(), profile_name)
}

/// Session file for a validated profile name.
pub fn session_path_in(dir: &Path, profile_name: &str) -> PathBuf {
    dir.join(format!("session-{profile_name}.json"))
}

/// Trims a profile name; blank means unset. Names become part of the session
/// file name, so only ASCII letters, digits, `-` and `_` are accepted.
pub fn normalize_profile_name(value: Option<&str>) -> Result<Option<String>, String> {
    let Some(value) = value.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(None);
    };
    if value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
    {
        Ok(Some(value.to_string()))
    } else {
        Err(format!(
            "Invalid profile name '{value}': use only letters, digits, '-' and '_'"
        ))
    }
}

impl CliProfilesConfig {
    pub fn load() -> Result<Self, String> {
        Self::load_from_path(&default_config_path())
    }

    pub fn load_from_path(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|error| format!("Failed to read config at {}: {}", path.display(), error))?;
        let mut config = serde_json::from_str::<Self>(&raw)
            .map_err(|error| format!("Failed to parse config at {}: {}", path.display(), error))?;
        config.normalize();
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf, String> {
        let path = default_config_path();
        self.save_to_path(&path)?;
        Ok(path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    error
                )
            })?;
        }

        let mut normalized = self.clone();
        normalized.normalize();
        let serialized = serde_json::to_string_pretty(&normalized)
            .map_err(|error| format!("Failed to serialize config: {error}"))?;
        std::fs::write(path, serialized)
            .map_err(|error| format!("Failed to write config at {}: {}", path.display(), error))
    }

    /// Explicit name, then `AGRILINK_PROFILE`, then the active profile, then
    /// `default`.
    pub fn resolve_profile_name(&self, explicit: Option<&str>) -> Result<String, String> {
        self.resolve_profile_name_from(explicit, std::env::var(PROFILE_ENV).ok().as_deref())
    }

    pub fn resolve_profile_name_from(
        &self,
        explicit: Option<&str>,
        from_env: Option<&str>,
    ) -> Result<String, String> {
        for candidate in [explicit, from_env, self.active_profile.as_deref()] {
            if let Some(name) = normalize_profile_name(candidate)? {
                return Ok(name);
            }
        }
        Ok(DEFAULT_PROFILE.to_string())
    }

    pub fn profile(&self, name: &str) -> Option<&CliProfile> {
        self.profiles.get(name)
    }

    pub fn profile_mut_or_default(&mut self, name: &str) -> &mut CliProfile {
        self.profiles.entry(name.to_string()).or_default()
    }

    /// Client config for a profile: `--api-url` beats the profile value,
    /// which beats `AGRILINK_API_URL` and the built-in default.
    pub fn client_config(
        &self,
        profile_name: &str,
        api_url_override: Option<String>,
    ) -> agrilink_core::Result<ClientConfig> {
        let profile_url = self
            .profile(profile_name)
            .and_then(|profile| profile.api_base_url.clone());
        ClientConfig::resolve(normalize_text_option(api_url_override).or(profile_url))
    }

    fn normalize(&mut self) {
        self.active_profile = normalize_text_option(self.active_profile.take());
        for profile in self.profiles.values_mut() {
            profile.api_base_url = normalize_text_option(profile.api_base_url.take());
        }
    }
}
