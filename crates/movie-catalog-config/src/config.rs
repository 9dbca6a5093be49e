use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::paths::PathManager;

pub const DEFAULT_PROXY_BASE: &str = "https://images.weserv.nl/";
pub const DEFAULT_FALLBACK_POSTER: &str = "https://placehold.co/400x600?text=No+Image";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub posters: PosterConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
    /// Overrides `<root>/store`; relative paths start at the shelf root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

/// Image proxy routing for poster URLs
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PosterConfig {
    #[serde(default = "default_proxy_base")]
    pub proxy_base: String,
    #[serde(default = "default_fallback_poster")]
    pub fallback: String,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            proxy_base: default_proxy_base(),
            fallback: default_fallback_poster(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `None` picks JSON when stdout is not a terminal
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: None,
            file: None,
        }
    }
}

fn default_proxy_base() -> String {
    DEFAULT_PROXY_BASE.to_string()
}

fn default_fallback_poster() -> String {
    DEFAULT_FALLBACK_POSTER.to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the file if present, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let proxy = validate_http_url("posters.proxy_base", &self.posters.proxy_base)?;
        if proxy.fragment().is_some() {
            return Err(anyhow::anyhow!("posters.proxy_base must not have a fragment: {}", self.posters.proxy_base));
        }
        // the poster target is appended as `url=`
        if proxy.query_pairs().any(|(key, _)| key == "url") {
            return Err(anyhow::anyhow!(
                "posters.proxy_base must not already carry a url parameter: {}",
                self.posters.proxy_base
            ));
        }
        validate_http_url("posters.fallback", &self.posters.fallback)?;

        let level = self.logging.level.to_lowercase();
        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&level.as_str()) {
            return Err(anyhow::anyhow!("Invalid logging.level: {}", self.logging.level));
        }

        Ok(())
    }

    /// Directory backing the blob store. A relative `[storage] dir` is taken from the config directory.
    pub fn store_dir(&self, paths: &PathManager) -> PathBuf {
        match &self.storage.dir {
            Some(dir) => paths.resolve(dir),
            None => paths.store_dir(),
        }
    }

    /// Log file from `[logging] file`, resolved like the store directory
    pub fn log_file(&self, paths: &PathManager) -> Option<PathBuf> {
        self.logging.file.as_deref().map(|file| paths.resolve(file))
    }
}

fn validate_http_url(field: &str, value: &str) -> anyhow::Result<url::Url> {
    let parsed = url::Url::parse(value)
        .map_err(|e| anyhow::anyhow!("{} is not a valid URL ({}): {}", field, e, value))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(anyhow::anyhow!("{} must use http or https, got {}", field, other)),
    }
}
