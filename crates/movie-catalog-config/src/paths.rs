use anyhow::Result;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Explicit shelf directory, wins over every other lookup
pub const HOME_ENV: &str = "REELSHELF_HOME";

/// Mount point checked for container installs
pub const CONTAINER_ENV: &str = "REELSHELF_BASE_PATH";
const CONTAINER_DEFAULT: &str = "/app";

/// How the shelf directory was found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShelfSource {
    /// `REELSHELF_HOME`
    Env,
    /// Container mount that already exists
    Container,
    /// Per-user platform directory (e.g. ~/.config/reelshelf)
    Platform,
    /// Set by the caller
    Explicit,
}

/// Directory layout of one movie shelf: the config file and the blob store live side by side under one root.
#[derive(Debug, Clone)]
pub struct PathManager {
    root: PathBuf,
    source: ShelfSource,
}

impl PathManager {
    pub fn with_base(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            source: ShelfSource::Explicit,
        }
    }

    /// Resolve the shelf root from the environment
    pub fn detect() -> Result<Self> {
        Self::detect_from(
            std::env::var_os(HOME_ENV).map(PathBuf::from),
            container_root(),
            dirs::config_dir(),
        )
    }

    fn detect_from(home: Option<PathBuf>, container: PathBuf, platform: Option<PathBuf>) -> Result<Self> {
        if let Some(root) = home.filter(|p| !p.as_os_str().is_empty()) {
            return Ok(Self { root, source: ShelfSource::Env });
        }
        // The image creates its mount point, so an existing one means we run inside it
        if container.is_dir() {
            return Ok(Self { root: container, source: ShelfSource::Container });
        }
        let platform = platform.ok_or_else(|| {
            anyhow::anyhow!("Could not determine a config directory; set {} to choose one", HOME_ENV)
        })?;
        Ok(Self {
            root: platform.join("reelshelf"),
            source: ShelfSource::Platform,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn source(&self) -> ShelfSource {
        self.source
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    /// Default directory for the movie and watchlist blobs
    pub fn store_dir(&self) -> PathBuf {
        self.root.join("store")
    }

    /// Relative paths from the config file are taken from the shelf root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(self.store_dir())?;
        Ok(())
    }
}

fn container_root() -> PathBuf {
    std::env::var_os(CONTAINER_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONTAINER_DEFAULT))
}
