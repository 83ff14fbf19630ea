use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Backend address used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// A cold-starting backend can take over a minute to answer.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(900);

pub const DEFAULT_HISTORY_LIMIT: u32 = 10;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// base_url = "https://tourism.example.com"
/// timeout_secs = 120
/// history_limit = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub history_limit: Option<u32>,
}

/// Values the HTTP client is built from, fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), timeout: DEFAULT_TIMEOUT }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
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

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

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
        let dirs = ProjectDirs::from("dev", "tourism-ai", "tourism-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Store a base URL after checking that it parses.
    pub fn set_base_url(&mut self, url: &str) -> Result<()> {
        let trimmed = url.trim();
        reqwest::Url::parse(trimmed).with_context(|| format!("Invalid base URL '{trimmed}'"))?;
        self.base_url = Some(trimmed.trim_end_matches('/').to_string());
        Ok(())
    }

    pub fn history_limit(&self) -> u32 {
        self.history_limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }

    /// Resolve client settings. `explicit_url` wins over the config file,
    /// which wins over [`DEFAULT_BASE_URL`]; same for the timeout.
    pub fn client_settings(
        &self,
        explicit_url: Option<&str>,
        explicit_timeout_secs: Option<u64>,
    ) -> ClientSettings {
        let base_url = explicit_url
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .or_else(|| self.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let timeout = explicit_timeout_secs
            .or(self.timeout_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        ClientSettings { base_url, timeout }
    }
}
