use movie_catalog_config::Config;
use movie_catalog_models::MovieRecord;
use std::sync::Arc;

use crate::blob::{BlobError, FileBlobStore, SharedBlobStore};
use crate::movie_store::MovieStore;
use crate::poster::PosterPolicy;
use crate::view::{compose, CategoryFilter, LiveView, ViewScope};
use crate::watchlist_store::WatchlistStore;

/// Movie store and watchlist store sharing one blob store
pub struct Catalog {
    pub movies: MovieStore,
    pub watchlist: WatchlistStore,
}

impl Catalog {
    pub fn open(blobs: SharedBlobStore, config: &Config) -> Self {
        let posters = PosterPolicy::from_config(&config.posters);
        Self {
            movies: MovieStore::open(blobs.clone(), posters),
            watchlist: WatchlistStore::open(blobs),
        }
    }

    /// Open over a directory of blob files
    pub fn open_dir(dir: impl Into<std::path::PathBuf>, config: &Config) -> Result<Self, BlobError> {
        let blobs: SharedBlobStore = Arc::new(FileBlobStore::new(dir)?);
        Ok(Self::open(blobs, config))
    }

    pub fn view(&self, scope: ViewScope, filter: CategoryFilter) -> Vec<MovieRecord> {
        compose(&self.movies.movies(), &self.watchlist.ids(), scope, filter)
    }

    pub fn live_view(&self, scope: ViewScope, filter: CategoryFilter) -> LiveView {
        LiveView::new(self.movies.subscribe(), self.watchlist.subscribe(), scope, filter)
    }
}
