use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Storage quota exceeded writing {key}: needs {needed} bytes, capacity {capacity}")]
    QuotaExceeded { key: String, needed: usize, capacity: usize },
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid blob key: {0:?}")]
    InvalidKey(String),
}

/// Durable named-string storage
pub trait BlobStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, BlobError>;
    fn set(&self, key: &str, value: &str) -> Result<(), BlobError>;
    /// Removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<(), BlobError>;
}

pub type SharedBlobStore = Arc<dyn BlobStore>;

fn check_key(key: &str) -> Result<(), BlobError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(BlobError::InvalidKey(key.to_string()))
    }
}

/// One file per key under a directory
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, BlobError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, BlobError> {
        check_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, BlobError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("Blob miss: {} (file does not exist)", key);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BlobError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, value)?;
        std::fs::rename(&temp_path, &path)?;

        debug!("Blob saved: {} ({} bytes)", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BlobError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[derive(Default)]
struct MemoryState {
    values: HashMap<String, String>,
    capacity: Option<usize>,
    unavailable: bool,
    writes: usize,
}

/// In-process blob store. Clones share the same contents.
///
/// Supports a byte quota and an "unavailable" switch so callers can exercise
/// the failure paths a browser-style local storage exhibits.
#[derive(Clone, Default)]
pub struct MemoryBlobStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total bytes across all keys may not exceed `capacity`
    pub fn with_capacity(capacity: usize) -> Self {
        let store = Self::default();
        store.lock().capacity = Some(capacity);
        store
    }

    /// Make every subsequent `set` fail (or succeed again)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Number of successful `set` calls so far
    pub fn writes(&self) -> usize {
        self.lock().writes
    }

    pub fn contains(&self, key: &str) -> bool {
        self.lock().values.contains_key(key)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // A poisoned lock only means a test thread panicked mid-write; the map is still usable
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>, BlobError> {
        check_key(key)?;
        Ok(self.lock().values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), BlobError> {
        check_key(key)?;
        let mut state = self.lock();
        if state.unavailable {
            return Err(BlobError::Unavailable("storage disabled".to_string()));
        }
        if let Some(capacity) = state.capacity {
            let others: usize = state
                .values
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > capacity {
                return Err(BlobError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    capacity,
                });
            }
        }
        state.values.insert(key.to_string(), value.to_string());
        state.writes += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), BlobError> {
        check_key(key)?;
        self.lock().values.remove(key);
        Ok(())
    }
}
