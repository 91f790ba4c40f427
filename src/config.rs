use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

const MIN_TIMEOUT_SECS: u64 = 5;
const MAX_TIMEOUT_SECS: u64 = 300;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub offline: bool,
    #[serde(default = "default_theme")]
    pub theme: String,
}

fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}
fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}
fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}
fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_theme() -> String {
    "slate".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            model: default_model(),
            api_base: default_api_base(),
            api_key_env: default_api_key_env(),
            request_timeout_secs: default_request_timeout_secs(),
            offline: false,
            theme: default_theme(),
        }
    }
}

impl Config {
    /// Load from the default location. A missing file yields defaults.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let config: Config = toml::from_str(&content)
                .with_context(|| format!("parsing {}", path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("devenglish")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// API key from the configured environment variable, if set and non-empty.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Clamp the timeout and reset an unknown theme.
    /// Call after deserialization and after applying command-line overrides.
    pub fn normalize(&mut self, known_themes: &[String]) {
        self.request_timeout_secs = self
            .request_timeout_secs
            .clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS);
        if !known_themes.iter().any(|t| *t == self.theme) {
            self.theme = default_theme();
        }
    }
}
