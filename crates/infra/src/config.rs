//! Client configuration read from the environment.

use std::path::PathBuf;

use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_AVATAR_URL: &str = "https://www.gravatar.com/avatar/?d=mp";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("ACCESSPANEL_API_URL must be an http(s) URL, got '{0}'")]
    InvalidApiUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the backend API.
    pub api_url: String,
    /// Directory for locally persisted blobs; `None` means the platform default.
    pub data_dir: Option<PathBuf>,
    /// Shown for users without an image.
    pub default_avatar_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: None,
            default_avatar_url: DEFAULT_AVATAR_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Read `ACCESSPANEL_API_URL`, `ACCESSPANEL_DATA_DIR` and
    /// `ACCESSPANEL_DEFAULT_AVATAR`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = lookup("ACCESSPANEL_API_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.api_url);
        if !(api_url.starts_with("http://") || api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(api_url));
        }

        let data_dir = lookup("ACCESSPANEL_DATA_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let default_avatar_url = lookup("ACCESSPANEL_DEFAULT_AVATAR")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.default_avatar_url);

        Ok(Self {
            api_url,
            data_dir,
            default_avatar_url,
        })
    }
}
