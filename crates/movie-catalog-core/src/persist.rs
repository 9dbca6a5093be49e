use serde::Serialize;
use tracing::{debug, warn};
use crate::blob::BlobStore;

pub const MOVIES_KEY: &str = "movies";
pub const WATCHLIST_KEY: &str = "watchlist";
pub const MIGRATION_FLAG_KEY: &str = "movies_proxy_migrated_v1";

/// Read a blob, treating read failures as absent
pub(crate) fn read_blob(blobs: &dyn BlobStore, key: &str) -> Option<String> {
    match blobs.get(key) {
        Ok(Some(raw)) => Some(raw),
        Ok(None) => {
            debug!("No stored {} found", key);
            None
        }
        Err(e) => {
            warn!("Failed to read stored {}: {}", key, e);
            None
        }
    }
}

/// Read a blob and parse it as JSON, treating unparseable content as absent
pub(crate) fn read_json(blobs: &dyn BlobStore, key: &str) -> Option<serde_json::Value> {
    let raw = read_blob(blobs, key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Stored {} is corrupted ({}), starting empty", key, e);
            None
        }
    }
}

/// Serialize and write. Failures are logged and reported as `false`, never raised.
pub(crate) fn write_json<T: Serialize + ?Sized>(blobs: &dyn BlobStore, key: &str, value: &T) -> bool {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            warn!("Failed to serialize {}: {}", key, e);
            return false;
        }
    };
    match blobs.set(key, &json) {
        Ok(()) => {
            debug!("Persisted {} ({} bytes)", key, json.len());
            true
        }
        Err(e) => {
            warn!("Failed to persist {}: {}", key, e);
            false
        }
    }
}

pub(crate) fn remove_blob(blobs: &dyn BlobStore, key: &str) {
    if let Err(e) = blobs.remove(key) {
        warn!("Failed to remove stored {}: {}", key, e);
    }
}
