use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// Environment variable carrying the GeoNames username (the geocoding credential).
pub const GEONAMES_USERNAME_ENV: &str = "GEONAMES_USERNAME";

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_GEONAMES_URL: &str = "http://api.geonames.org/searchJSON";
pub const DEFAULT_LANG: &str = "ru";

/// Settings for the GeoNames search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoNamesConfig {
    pub url: String,
    pub lang: String,
    pub username: Option<String>,
}

impl Default for GeoNamesConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_GEONAMES_URL.to_string(),
            lang: DEFAULT_LANG.to_string(),
            username: None,
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// backend_url = "http://127.0.0.1:5000"
///
/// [geonames]
/// username = "..."
/// lang = "ru"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the weather backend serving `/api/weather`.
    pub backend_url: String,
    pub geonames: GeoNamesConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            geonames: GeoNamesConfig::default(),
        }
    }
}

impl Config {
    /// Load config from disk (or defaults on first run), then apply the
    /// credential from the environment. Called once at startup.
    pub fn load() -> Result<Self> {
        let cfg = Self::load_file()?;
        Ok(cfg.with_env_username(std::env::var(GEONAMES_USERNAME_ENV).ok()))
    }

    /// Load config from disk only, or return an empty default if it doesn't exist yet.
    pub fn load_file() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// A non-empty username from the environment wins over the file value.
    pub fn with_env_username(mut self, username: Option<String>) -> Self {
        if let Some(name) = username.filter(|n| !n.trim().is_empty()) {
            self.geonames.username = Some(name);
        }
        self
    }

    /// Returns the GeoNames username, if present.
    pub fn geonames_username(&self) -> Option<&str> {
        self.geonames.username.as_deref().filter(|n| !n.is_empty())
    }

    /// Like [`Config::geonames_username`], but a missing credential is an error with a hint.
    pub fn require_geonames_username(&self) -> Result<&str> {
        self.geonames_username().ok_or_else(|| {
            anyhow!(
                "No GeoNames username configured.\n\
                 Hint: set {GEONAMES_USERNAME_ENV} or run `weather configure`."
            )
        })
    }
}
