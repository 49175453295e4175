use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::provider::visualcrossing::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

pub const ENV_API_TOKEN: &str = "WEATHER_API_TOKEN";
pub const ENV_PROVIDER_API_KEY: &str = "WEATHER_PROVIDER_API_KEY";
pub const ENV_PROVIDER_BASE_URL: &str = "WEATHER_PROVIDER_BASE_URL";
pub const ENV_PROVIDER_TIMEOUT_SECS: &str = "WEATHER_PROVIDER_TIMEOUT_SECS";

/// Settings for the weather provider.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProviderConfig {
    pub api_key: Option<String>,

    /// Timeline endpoint; defaults to the public Visual Crossing service.
    pub base_url: Option<String>,

    /// Outbound request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_token = "..."
///
/// [provider]
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Shared secret callers must send as `token`.
    pub api_token: Option<String>,

    #[serde(default)]
    pub provider: ProviderConfig,
}

impl Config {
    /// Load config from the platform config directory, or return an empty
    /// default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config directory.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-saas", "weather-saas")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay `WEATHER_*` environment variables on top of the file values.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Overlay values produced by `lookup`, keyed by environment variable name.
    /// Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        if let Some(token) = get(ENV_API_TOKEN) {
            self.api_token = Some(token);
        }
        if let Some(key) = get(ENV_PROVIDER_API_KEY) {
            self.provider.api_key = Some(key);
        }
        if let Some(url) = get(ENV_PROVIDER_BASE_URL) {
            self.provider.base_url = Some(url);
        }
        if let Some(secs) = get(ENV_PROVIDER_TIMEOUT_SECS) {
            let secs = secs
                .parse()
                .with_context(|| format!("{ENV_PROVIDER_TIMEOUT_SECS} must be whole seconds, got '{secs}'"))?;
            self.provider.timeout_secs = Some(secs);
        }

        Ok(())
    }

    pub fn api_token(&self) -> Result<&str> {
        self.api_token.as_deref().ok_or_else(|| {
            anyhow!(
                "No API token configured.\n\
                 Hint: run `weather configure` or set {ENV_API_TOKEN}."
            )
        })
    }

    pub fn provider_api_key(&self) -> Result<&str> {
        self.provider.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No provider API key configured.\n\
                 Hint: run `weather configure` or set {ENV_PROVIDER_API_KEY}."
            )
        })
    }

    pub fn provider_base_url(&self) -> &str {
        self.provider.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn provider_timeout(&self) -> Duration {
        self.provider.timeout_secs.map(Duration::from_secs).unwrap_or(DEFAULT_TIMEOUT)
    }
}
