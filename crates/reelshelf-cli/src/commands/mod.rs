pub mod config;
pub mod movies;
pub mod reset;
pub mod watchlist;

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use comfy_table::Table;
use movie_catalog_config::{Config, PathManager};
use movie_catalog_core::Catalog;

/// Paths and configuration resolved once per invocation
pub struct Session {
    pub paths: PathManager,
    pub config: Config,
}

impl Session {
    pub fn load() -> Result<Self> {
        let paths = PathManager::detect().map_err(|e| eyre!("{}", e))?;
        let config_file = paths.config_file();

        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        config
            .validate()
            .map_err(|e| eyre!("Invalid config in {}: {}", config_file.display(), e))?;

        Ok(Self { paths, config })
    }

    pub fn open_catalog(&self) -> Result<Catalog> {
        let dir = self.config.store_dir(&self.paths);
        Catalog::open_dir(dir.clone(), &self.config)
            .wrap_err_with(|| format!("Failed to open movie store at {}", dir.display()))
    }
}

pub(crate) fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}
