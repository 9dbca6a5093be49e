use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{debug, warn};

use crate::blob::SharedBlobStore;
use crate::live::{LiveValue, Subscription};
use crate::persist::{self, WATCHLIST_KEY};

pub type WatchlistSet = BTreeSet<String>;

/// Set of movie ids the user wants to watch.
///
/// Persists and notifies only when membership actually changes.
pub struct WatchlistStore {
    blobs: SharedBlobStore,
    live: LiveValue<WatchlistSet>,
}

impl WatchlistStore {
    pub fn open(blobs: SharedBlobStore) -> Self {
        let ids = persist::read_json(&*blobs, WATCHLIST_KEY)
            .map(decode_ids)
            .unwrap_or_default();
        debug!("Loaded watchlist with {} ids", ids.len());

        Self {
            blobs,
            live: LiveValue::new(ids),
        }
    }

    pub fn subscribe(&self) -> Subscription<WatchlistSet> {
        self.live.subscribe()
    }

    pub fn ids(&self) -> WatchlistSet {
        self.live.current()
    }

    pub fn len(&self) -> usize {
        self.live.with_current(BTreeSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn has(&self, id: &str) -> bool {
        self.live.with_current(|ids| ids.contains(id))
    }

    /// Returns true if the id was newly added
    pub fn add(&mut self, id: &str) -> bool {
        if self.has(id) {
            return false;
        }
        let mut next = self.live.current();
        next.insert(id.to_string());
        self.commit(next);
        true
    }

    /// Returns true if the id was present
    pub fn remove(&mut self, id: &str) -> bool {
        if !self.has(id) {
            return false;
        }
        let mut next = self.live.current();
        next.remove(id);
        self.commit(next);
        true
    }

    /// Flip membership; returns whether the id is now in the watchlist
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.has(id) {
            self.remove(id);
            false
        } else {
            self.add(id);
            true
        }
    }

    /// Returns true if anything was removed
    pub fn clear(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.commit(WatchlistSet::new());
        true
    }

    fn commit(&mut self, next: WatchlistSet) {
        persist::write_json(&*self.blobs, WATCHLIST_KEY, &next);
        self.live.publish(next);
    }
}

/// Strings are kept, numbers stringified, anything else ignored
fn decode_ids(value: Value) -> WatchlistSet {
    let Value::Array(items) = value else {
        warn!("Stored watchlist is not a list, starting empty");
        return WatchlistSet::new();
    };

    items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) if !s.is_empty() => Some(s),
            Value::Number(n) => Some(n.to_string()),
            other => {
                warn!("Ignoring watchlist entry {}", other);
                None
            }
        })
        .collect()
}
