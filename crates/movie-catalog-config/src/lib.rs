pub mod config;
pub mod paths;

pub use config::{Config, LoggingConfig, PosterConfig, StorageConfig, DEFAULT_FALLBACK_POSTER, DEFAULT_PROXY_BASE};
pub use paths::{PathManager, ShelfSource};
