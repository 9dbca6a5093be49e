use chrono::{DateTime, Duration, TimeZone, Utc};
use movie_catalog_models::{Category, MovieRecord, MoviePatch, NewMovie, Rating};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::blob::SharedBlobStore;
use crate::error::{StoreError, StoreResult};
use crate::live::{LiveValue, Subscription};
use crate::persist::{self, MIGRATION_FLAG_KEY, MOVIES_KEY};
use crate::poster::PosterPolicy;
use crate::seed::seed_movies;

/// Earliest year a motion picture can have been released
pub const MIN_RELEASE_YEAR: u16 = 1888;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// Flag already set; nothing was touched
    AlreadyApplied,
    /// Collection rewritten and persisted, flag set
    Applied { records: usize },
    /// Rewritten in memory but could not be persisted; flag left unset so the next start retries
    Deferred,
}

/// The movie catalog: in-memory source of truth, persisted to the `movies` blob
/// and published to subscribers after every change.
///
/// Mutations take `&mut self`, so there is exactly one writer per store.
pub struct MovieStore {
    blobs: SharedBlobStore,
    posters: PosterPolicy,
    movies: LiveValue<Vec<MovieRecord>>,
    last_added: Option<DateTime<Utc>>,
}

impl MovieStore {
    /// Load the stored collection, seed it if empty, then run the one-time poster migration
    pub fn open(blobs: SharedBlobStore, posters: PosterPolicy) -> Self {
        let loaded = match persist::read_json(&*blobs, MOVIES_KEY) {
            Some(value) => decode_collection(value, &posters),
            None => Vec::new(),
        };
        debug!("Loaded {} stored movies", loaded.len());

        let mut store = Self {
            blobs,
            posters,
            last_added: loaded.iter().map(|m| m.date_added).max(),
            movies: LiveValue::new(loaded),
        };
        store.seed_if_empty();
        store.migrate_posters_once();
        store
    }

    pub fn posters(&self) -> &PosterPolicy {
        &self.posters
    }

    pub fn subscribe(&self) -> Subscription<Vec<MovieRecord>> {
        self.movies.subscribe()
    }

    /// Snapshot of the whole collection
    pub fn movies(&self) -> Vec<MovieRecord> {
        self.movies.current()
    }

    pub fn len(&self) -> usize {
        self.movies.with_current(Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<MovieRecord> {
        self.movies
            .with_current(|movies| movies.iter().find(|m| m.id == id).cloned())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.movies.with_current(|movies| movies.iter().any(|m| m.id == id))
    }

    pub fn create(&mut self, payload: NewMovie) -> StoreResult<MovieRecord> {
        check_fields(&payload.title, payload.release_year, payload.duration, payload.imdb_rating)?;

        let record = self.materialize(payload);
        let mut next = self.movies.current();
        next.push(record.clone());
        self.commit(next);

        info!("Added movie {} ({})", record.title, record.id);
        Ok(record)
    }

    /// Shallow-merge `patch` onto the record with `id`. `id` and `date_added` never change.
    pub fn update(&mut self, id: &str, patch: MoviePatch) -> StoreResult<MovieRecord> {
        let mut next = self.movies.current();
        let index = next
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;

        let mut merged = next[index].clone();
        patch.merge_into(&mut merged);
        merged.poster_url = self.posters.normalize_or_fallback(Some(merged.poster_url.as_str()));
        check_fields(&merged.title, merged.release_year, merged.duration, merged.imdb_rating)?;

        next[index] = merged.clone();
        self.commit(next);

        debug!("Updated movie {}", id);
        Ok(merged)
    }

    pub fn delete(&mut self, id: &str) -> StoreResult<()> {
        if !self.contains(id) {
            return Err(StoreError::not_found(id));
        }

        let next: Vec<MovieRecord> = self
            .movies
            .current()
            .into_iter()
            .filter(|m| m.id != id)
            .collect();
        self.commit(next);

        info!("Deleted movie {}", id);
        Ok(())
    }

    /// Populate an empty collection from the built-in list in one batch.
    /// Returns the number of movies seeded (0 when the collection was not empty).
    pub fn seed_if_empty(&mut self) -> usize {
        if !self.is_empty() {
            return 0;
        }

        let seeded: Vec<MovieRecord> = seed_movies()
            .into_iter()
            .map(|payload| self.materialize(payload))
            .collect();
        let count = seeded.len();
        self.commit(seeded);

        info!("Seeded catalog with {} movies", count);
        count
    }

    /// Rewrite every poster through the policy once per store lifetime, guarded by a durable flag
    pub fn migrate_posters_once(&mut self) -> MigrationOutcome {
        if persist::read_blob(&*self.blobs, MIGRATION_FLAG_KEY).is_some() {
            debug!("Poster migration already applied");
            return MigrationOutcome::AlreadyApplied;
        }

        let next: Vec<MovieRecord> = self
            .movies
            .current()
            .into_iter()
            .map(|mut movie| {
                movie.poster_url = self.posters.normalize_or_fallback(Some(movie.poster_url.as_str()));
                movie
            })
            .collect();
        let records = next.len();

        if !self.commit(next) {
            warn!("Poster migration could not be persisted, will retry on next start");
            return MigrationOutcome::Deferred;
        }
        if let Err(e) = self.blobs.set(MIGRATION_FLAG_KEY, "1") {
            warn!("Failed to record poster migration flag: {}", e);
            return MigrationOutcome::Deferred;
        }

        info!("Migrated posters for {} movies to proxy form", records);
        MigrationOutcome::Applied { records }
    }

    /// Development helper: drop the stored collection and migration flag, then seed and migrate again
    pub fn reset_and_reseed(&mut self) -> usize {
        persist::remove_blob(&*self.blobs, MOVIES_KEY);
        persist::remove_blob(&*self.blobs, MIGRATION_FLAG_KEY);
        self.movies.publish(Vec::new());

        let seeded = self.seed_if_empty();
        self.migrate_posters_once();
        info!("Catalog reset and reseeded");
        seeded
    }

    /// Persist, then notify. A failed write is logged and does not roll back the in-memory state.
    fn commit(&mut self, next: Vec<MovieRecord>) -> bool {
        let durable = persist::write_json(&*self.blobs, MOVIES_KEY, &next);
        self.movies.publish(next);
        durable
    }

    fn materialize(&mut self, payload: NewMovie) -> MovieRecord {
        MovieRecord {
            id: self.fresh_id(),
            title: payload.title,
            description: payload.description,
            release_year: payload.release_year,
            category: payload.category,
            rating: payload.rating,
            duration: payload.duration,
            director: payload.director,
            cast: payload.cast,
            imdb_rating: payload.imdb_rating,
            poster_url: self.posters.normalize_or_fallback(payload.poster_url.as_deref()),
            date_added: self.next_timestamp(),
            is_watched: false,
        }
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::now_v7().to_string();
            if !self.contains(&id) {
                return id;
            }
        }
    }

    /// Strictly increasing across everything this store has loaded or assigned
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let assigned = match self.last_added {
            Some(last) if now <= last => last + Duration::milliseconds(1),
            _ => now,
        };
        self.last_added = Some(assigned);
        assigned
    }
}

fn check_fields(title: &str, release_year: u16, duration: Option<u32>, imdb_rating: Option<f32>) -> StoreResult<()> {
    if title.trim().is_empty() {
        return Err(StoreError::Invalid("title is required".to_string()));
    }
    if release_year < MIN_RELEASE_YEAR {
        return Err(StoreError::Invalid(format!(
            "release year {} is before {}",
            release_year, MIN_RELEASE_YEAR
        )));
    }
    if duration == Some(0) {
        return Err(StoreError::Invalid("duration must be positive".to_string()));
    }
    if let Some(score) = imdb_rating {
        if !(0.0..=10.0).contains(&score) {
            return Err(StoreError::Invalid(format!("IMDb rating {} is outside 0-10", score)));
        }
    }
    Ok(())
}

/// Persisted shape, tolerant of records written by older versions
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredMovie {
    id: Value,
    title: String,
    #[serde(default)]
    description: String,
    release_year: u16,
    category: Category,
    rating: Rating,
    #[serde(default)]
    duration: Option<u32>,
    #[serde(default)]
    director: Option<String>,
    #[serde(default)]
    cast: Option<Vec<String>>,
    #[serde(default)]
    imdb_rating: Option<f32>,
    #[serde(default)]
    poster_url: Option<String>,
    #[serde(default)]
    date_added: Option<Value>,
    #[serde(default)]
    is_watched: bool,
}

impl StoredMovie {
    fn into_record(self, posters: &PosterPolicy, loaded_at: DateTime<Utc>) -> Option<MovieRecord> {
        let id = match self.id {
            Value::String(s) if !s.trim().is_empty() => s,
            Value::Number(n) => n.to_string(),
            _ => return None,
        };

        Some(MovieRecord {
            id,
            title: self.title,
            description: self.description,
            release_year: self.release_year,
            category: self.category,
            rating: self.rating,
            duration: self.duration,
            director: self.director,
            cast: self.cast,
            imdb_rating: self.imdb_rating,
            poster_url: posters.normalize_or_fallback(self.poster_url.as_deref()),
            date_added: self.date_added.as_ref().and_then(parse_timestamp).unwrap_or(loaded_at),
            is_watched: self.is_watched,
        })
    }
}

/// RFC 3339 strings, or epoch milliseconds
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

/// Validate a stored collection. Anything that is not a list becomes empty; undecodable
/// entries and repeated ids are dropped.
fn decode_collection(value: Value, posters: &PosterPolicy) -> Vec<MovieRecord> {
    let Value::Array(items) = value else {
        warn!("Stored movies are not a list, starting empty");
        return Vec::new();
    };

    let loaded_at = Utc::now();
    let mut seen = HashSet::new();
    let mut movies = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let stored = match serde_json::from_value::<StoredMovie>(item) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Skipping stored movie #{}: {}", index, e);
                continue;
            }
        };
        let Some(record) = stored.into_record(posters, loaded_at) else {
            warn!("Skipping stored movie #{}: missing id", index);
            continue;
        };
        if !seen.insert(record.id.clone()) {
            warn!("Skipping stored movie #{}: duplicate id {}", index, record.id);
            continue;
        }
        movies.push(record);
    }

    movies
}

#[cfg(test)]
mod tests;
