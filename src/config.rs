//! Runtime configuration.
//!
//! Settings come from an optional YAML file and are then overridden by
//! command-line flags and environment variables. The only setting that
//! changes behaviour (rather than tuning it) is the API credential: when it
//! is missing or still a placeholder, every request is served offline.
//!
//! ```yaml
//! api_key: "0123456789abcdef"
//! base_url: "https://newsapi.org/v2"
//! timeout_secs: 10
//! country: gb
//! language: en
//! ```

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

use crate::api::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::ConfigError;
use crate::models::{Country, Language};

/// Credential values shipped in sample env files; treated as "not configured".
pub const PLACEHOLDER_KEYS: [&str; 2] = ["your-api-key-here", "your_newsapi_key_here"];

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout_secs: u64,
    pub country: Country,
    pub language: Language,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            country: Country::default(),
            language: Language::default(),
        }
    }
}

impl Config {
    /// Load a YAML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Yaml`] when it is not valid YAML for this struct.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let config = Self::from_yaml(&raw).map_err(|source| ConfigError::Yaml {
            path: display,
            source,
        })?;
        info!(live = config.has_live_credential(), "Loaded configuration");
        Ok(config)
    }

    /// Parse a config from YAML text. Missing keys take their defaults.
    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// The credential, if it can be used for live requests.
    pub fn live_credential(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| is_live_credential(key))
    }

    pub fn has_live_credential(&self) -> bool {
        self.live_credential().is_some()
    }
}

/// Whether `key` is a usable credential: non-blank and not a known placeholder.
pub fn is_live_credential(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && !PLACEHOLDER_KEYS.contains(&key)
}
