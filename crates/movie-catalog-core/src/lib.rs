pub mod blob;
pub mod catalog;
pub mod error;
pub mod live;
pub mod movie_store;
pub mod persist;
pub mod poster;
pub mod seed;
pub mod view;
pub mod watchlist_store;

pub use blob::{BlobError, BlobStore, FileBlobStore, MemoryBlobStore, SharedBlobStore};
pub use catalog::Catalog;
pub use error::{StoreError, StoreResult};
pub use live::{LiveValue, Subscription};
pub use movie_store::{MigrationOutcome, MovieStore};
pub use poster::PosterPolicy;
pub use view::{compose, CategoryFilter, LiveView, ViewScope};
pub use watchlist_store::{WatchlistSet, WatchlistStore};
