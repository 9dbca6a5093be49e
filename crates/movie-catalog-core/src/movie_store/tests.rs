use super::*;
use crate::blob::{BlobStore, MemoryBlobStore};
use movie_catalog_config::DEFAULT_FALLBACK_POSTER;
use std::sync::Arc;

fn payload(title: &str, category: Category) -> NewMovie {
    NewMovie {
        poster_url: Some("img.example.com/poster.jpg".to_string()),
        ..NewMovie::new(title, 2001, category, Rating::Pg13)
    }
}

/// A store over `blobs` that already holds one movie, so no seeding happens
fn store_with_one_movie(blobs: &MemoryBlobStore) -> MovieStore {
    let existing = serde_json::json!([{
        "id": "existing",
        "title": "Existing",
        "description": "",
        "releaseYear": 1999,
        "category": "DRAMA",
        "rating": "R",
        "posterUrl": "https://img.example.com/existing.jpg",
        "dateAdded": "2024-01-01T00:00:00Z",
        "isWatched": false
    }]);
    blobs.set(MOVIES_KEY, &existing.to_string()).unwrap();
    MovieStore::open(Arc::new(blobs.clone()), PosterPolicy::default())
}

fn stored_movies(blobs: &MemoryBlobStore) -> Vec<MovieRecord> {
    let raw = blobs.get(MOVIES_KEY).unwrap().unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_open_empty_store_seeds_and_migrates() {
    let blobs = MemoryBlobStore::new();
    let store = MovieStore::open(Arc::new(blobs.clone()), PosterPolicy::default());

    assert_eq!(store.len(), seed_movies().len());
    assert_eq!(stored_movies(&blobs).len(), store.len());
    assert_eq!(blobs.get(MIGRATION_FLAG_KEY).unwrap().as_deref(), Some("1"));

    let movies = store.movies();
    assert!(movies.iter().all(|m| m.poster_url.starts_with("https://")));
    assert!(movies.iter().all(|m| !m.is_watched));
    // seeded in one batch with strictly increasing timestamps
    assert!(movies.windows(2).all(|w| w[0].date_added < w[1].date_added));
}

#[test]
fn test_seed_skipped_when_collection_not_empty() {
    let blobs = MemoryBlobStore::new();
    let mut store = store_with_one_movie(&blobs);

    assert_eq!(store.len(), 1);
    assert_eq!(store.seed_if_empty(), 0);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_create_assigns_identity_and_defaults() {
    let blobs = MemoryBlobStore::new();
    let mut store = store_with_one_movie(&blobs);

    let first = store.create(payload("Amélie", Category::Romance)).unwrap();
    let second = store.create(payload("Amélie", Category::Romance)).unwrap();

    assert_ne!(first.id, second.id);
    assert_ne!(first.id, "existing");
    assert!(!first.is_watched);
    assert!(first.date_added < second.date_added);
    assert_eq!(
        first.poster_url,
        "https://images.weserv.nl/?url=img.example.com%2Fposter.jpg"
    );
    assert_eq!(store.get(&first.id), Some(first.clone()));
    assert_eq!(stored_movies(&blobs).len(), 3);
}

#[test]
fn test_create_without_poster_uses_fallback() {
    let blobs = MemoryBlobStore::new();
    let mut store = store_with_one_movie(&blobs);

    let created = store
        .create(NewMovie::new("Untitled Project", 2020, Category::Drama, Rating::Nr))
        .unwrap();
    assert_eq!(created.poster_url, DEFAULT_FALLBACK_POSTER);
}

#[test]
fn test_create_rejects_invalid_payload_without_change() {
    let blobs = MemoryBlobStore::new();
    let mut store = store_with_one_movie(&blobs);
    let writes = blobs.writes();
    let mut sub = store.subscribe();
    sub.latest();

    let too_early = NewMovie::new("Roundhay Garden Scene", 1887, Category::Documentary, Rating::G);
    assert!(matches!(store.create(too_early), Err(StoreError::Invalid(_))));

    let blank = NewMovie::new("   ", 2000, Category::Drama, Rating::G);
    assert!(matches!(store.create(blank), Err(StoreError::Invalid(_))));

    let mut zero_runtime = payload("Short", Category::Animation);
    zero_runtime.duration = Some(0);
    assert!(matches!(store.create(zero_runtime), Err(StoreError::Invalid(_))));

    assert_eq!(store.len(), 1);
    assert_eq!(blobs.writes(), writes);
    assert!(!sub.has_pending());
}

#[tokio::test]
async fn test_update_merges_and_notifies_once() {
    let blobs = MemoryBlobStore::new();
    let mut store = store_with_one_movie(&blobs);
    let mut sub = store.subscribe();
    assert_eq!(sub.next().await.map(|ms| ms.len()), Some(1));

    let writes = blobs.writes();
    let patch = MoviePatch {
        title: Some("Existing (Director's Cut)".to_string()),
        is_watched: Some(true),
        ..MoviePatch::default()
    };
    let updated = store.update("existing", patch).unwrap();

    assert_eq!(updated.title, "Existing (Director's Cut)");
    assert!(updated.is_watched);
    assert_eq!(updated.release_year, 1999);
    assert_eq!(updated.id, "existing");
    assert_eq!(blobs.writes(), writes + 1);

    let pushed = sub.next().await.unwrap();
    assert_eq!(pushed, vec![updated]);
    assert!(!sub.has_pending());
}

#[test]
fn test_empty_patch_keeps_fields_but_still_persists() {
    let blobs = MemoryBlobStore::new();
    let mut store = store_with_one_movie(&blobs);
    let before = store.get("existing").unwrap();
    let writes = blobs.writes();
    let mut sub = store.subscribe();
    sub.latest();

    let after = store.update("existing", MoviePatch::default()).unwrap();

    assert_eq!(after, before);
    assert_eq!(blobs.writes(), writes + 1);
    assert!(sub.has_pending());
    assert_eq!(sub.latest(), vec![before]);
}

#[test]
fn test_update_missing_id_is_not_found_and_silent() {
    let blobs = MemoryBlobStore::new();
    let mut store = store_with_one_movie(&blobs);
    let writes = blobs.writes();
    let mut sub = store.subscribe();
    sub.latest();

    let err = store.update("ghost", MoviePatch::default()).unwrap_err();

    assert_eq!(err, StoreError::NotFound { id: "ghost".to_string() });
    assert_eq!(err.to_string(), "Movie with ID ghost not found");
    assert!(!sub.has_pending());
    assert_eq!(blobs.writes(), writes);
}

#[test]
fn test_update_renormalizes_poster() {
    let blobs = MemoryBlobStore::new();
    let mut store = store_with_one_movie(&blobs);

    let patch = MoviePatch {
        poster_url: Some("//cdn.example.com/new.jpg".to_string()),
        ..MoviePatch::default()
    };
    let updated = store.update("existing", patch).unwrap();
    assert_eq!(updated.poster_url, "https://images.weserv.nl/?url=cdn.example.com%2Fnew.jpg");

    let cleared = MoviePatch {
        poster_url: Some(String::new()),
        ..MoviePatch::default()
    };
    assert_eq!(store.update("existing", cleared).unwrap().poster_url, DEFAULT_FALLBACK_POSTER);
}

#[test]
fn test_update_rejecting_merged_record_leaves_state() {
    let blobs = MemoryBlobStore::new();
    let mut store = store_with_one_movie(&blobs);
    let patch = MoviePatch {
        imdb_rating: Some(11.0),
        ..MoviePatch::default()
    };
    assert!(matches!(store.update("existing", patch), Err(StoreError::Invalid(_))));
    assert_eq!(store.get("existing").unwrap().imdb_rating, None);
}

#[test]
fn test_delete_then_get_is_absent() {
    let blobs = MemoryBlobStore::new();
    let mut store = store_with_one_movie(&blobs);

    store.delete("existing").unwrap();
    assert_eq!(store.get("existing"), None);
    assert!(stored_movies(&blobs).is_empty());

    let err = store.delete("existing").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_persist_failure_still_updates_memory_and_stream() {
    let blobs = MemoryBlobStore::new();
    let mut store = store_with_one_movie(&blobs);
    let mut sub = store.subscribe();
    sub.latest();

    blobs.set_unavailable(true);
    let created = store.create(payload("Offline", Category::Comedy)).unwrap();

    assert_eq!(store.len(), 2);
    assert!(sub.has_pending());
    assert!(sub.latest().iter().any(|m| m.id == created.id));
    // durable copy is stale until the next successful write
    assert_eq!(stored_movies(&blobs).len(), 1);

    blobs.set_unavailable(false);
    store.update(&created.id, MoviePatch::default()).unwrap();
    assert_eq!(stored_movies(&blobs).len(), 2);
}

#[test]
fn test_quota_exceeded_is_not_propagated() {
    let blobs = MemoryBlobStore::with_capacity(900);
    let mut store = store_with_one_movie(&blobs);
    let mut big = payload("Very Long", Category::Drama);
    big.description = "x".repeat(2000);

    let created = store.create(big).unwrap();
    assert!(store.get(&created.id).is_some());
    assert_eq!(stored_movies(&blobs).len(), 1);
}

#[test]
fn test_migration_runs_once_and_is_idempotent() {
    let blobs = MemoryBlobStore::new();
    let mut store = store_with_one_movie(&blobs);
    let after_first = blobs.get(MOVIES_KEY).unwrap();
    let writes = blobs.writes();

    assert_eq!(store.migrate_posters_once(), MigrationOutcome::AlreadyApplied);
    assert_eq!(blobs.writes(), writes);

    // even forced to re-run, already-proxied URLs come out unchanged
    blobs.remove(MIGRATION_FLAG_KEY).unwrap();
    assert_eq!(store.migrate_posters_once(), MigrationOutcome::Applied { records: 1 });
    assert_eq!(blobs.get(MOVIES_KEY).unwrap(), after_first);
}

#[test]
fn test_migration_rewrites_legacy_posters() {
    let blobs = MemoryBlobStore::new();
    let legacy = serde_json::json!([
        {"id": "a", "title": "A", "releaseYear": 2000, "category": "ACTION", "rating": "PG",
         "posterUrl": "//img.example.com/a.jpg", "dateAdded": "2023-02-03T04:05:06.789Z"},
        {"id": "b", "title": "B", "releaseYear": 2001, "category": "COMEDY", "rating": "G"}
    ]);
    blobs.set(MOVIES_KEY, &legacy.to_string()).unwrap();

    let store = MovieStore::open(Arc::new(blobs.clone()), PosterPolicy::default());
    let persisted = stored_movies(&blobs);

    assert_eq!(persisted.len(), 2);
    assert_eq!(persisted[0].poster_url, "https://images.weserv.nl/?url=img.example.com%2Fa.jpg");
    assert_eq!(persisted[1].poster_url, DEFAULT_FALLBACK_POSTER);
    assert_eq!(persisted[0].date_added.to_rfc3339(), "2023-02-03T04:05:06.789+00:00");
    assert_eq!(store.movies(), persisted);
}

#[test]
fn test_migration_does_not_double_wrap_legacy_proxied_posters() {
    let blobs = MemoryBlobStore::new();
    let legacy = serde_json::json!([
        {"id": "a", "title": "A", "releaseYear": 2000, "category": "ACTION", "rating": "PG",
         "posterUrl": "//images.weserv.nl/?url=img.example.com%2Fa.jpg"},
        {"id": "b", "title": "B", "releaseYear": 2001, "category": "COMEDY", "rating": "G",
         "posterUrl": "http://images.weserv.nl?url=img.example.com%2Fb.jpg"}
    ]);
    blobs.set(MOVIES_KEY, &legacy.to_string()).unwrap();

    let _store = MovieStore::open(Arc::new(blobs.clone()), PosterPolicy::default());
    let persisted = stored_movies(&blobs);

    assert_eq!(persisted[0].poster_url, "https://images.weserv.nl/?url=img.example.com%2Fa.jpg");
    assert_eq!(persisted[1].poster_url, "https://images.weserv.nl/?url=img.example.com%2Fb.jpg");
}

#[test]
fn test_flag_set_skips_migration_of_new_data() {
    let blobs = MemoryBlobStore::new();
    blobs.set(MIGRATION_FLAG_KEY, "1").unwrap();
    let raw = serde_json::json!([
        {"id": "a", "title": "A", "releaseYear": 2000, "category": "ACTION", "rating": "PG",
         "posterUrl": "img.example.com/a.jpg"}
    ])
    .to_string();
    blobs.set(MOVIES_KEY, &raw).unwrap();
    let writes = blobs.writes();

    let _store = MovieStore::open(Arc::new(blobs.clone()), PosterPolicy::default());

    assert_eq!(blobs.writes(), writes);
    assert_eq!(blobs.get(MOVIES_KEY).unwrap().as_deref(), Some(raw.as_str()));
}

#[test]
fn test_failed_migration_leaves_flag_unset() {
    let blobs = MemoryBlobStore::new();
    blobs.set_unavailable(true);
    let store = MovieStore::open(Arc::new(blobs.clone()), PosterPolicy::default());

    assert_eq!(store.len(), seed_movies().len());
    assert!(!blobs.contains(MIGRATION_FLAG_KEY));
}

#[test]
fn test_malformed_blob_loads_empty_then_seeds() {
    let blobs = MemoryBlobStore::new();
    blobs.set(MOVIES_KEY, "{not json").unwrap();
    let store = MovieStore::open(Arc::new(blobs.clone()), PosterPolicy::default());
    assert_eq!(store.len(), seed_movies().len());

    let blobs = MemoryBlobStore::new();
    blobs.set(MOVIES_KEY, "{\"movies\": []}").unwrap();
    let store = MovieStore::open(Arc::new(blobs.clone()), PosterPolicy::default());
    assert_eq!(store.len(), seed_movies().len());
}

#[test]
fn test_decode_skips_bad_entries_and_duplicate_ids() {
    let value = serde_json::json!([
        {"id": "a", "title": "A", "releaseYear": 2000, "category": "ACTION", "rating": "PG"},
        {"id": "a", "title": "A again", "releaseYear": 2000, "category": "ACTION", "rating": "PG"},
        {"id": 7, "title": "Numeric", "releaseYear": 2000, "category": "DRAMA", "rating": "PG-13",
         "dateAdded": 1700000000000i64, "isWatched": true},
        {"id": "", "title": "No id", "releaseYear": 2000, "category": "DRAMA", "rating": "R"},
        {"id": "c", "title": "Bad category", "releaseYear": 2000, "category": "WESTERN", "rating": "R"},
        "just a string",
        {"id": "d", "title": "Bad date", "releaseYear": 2000, "category": "HORROR", "rating": "R",
         "dateAdded": "yesterday"}
    ]);

    let movies = decode_collection(value, &PosterPolicy::default());
    let ids: Vec<&str> = movies.iter().map(|m| m.id.as_str()).collect();

    assert_eq!(ids, vec!["a", "7", "d"]);
    assert_eq!(movies[0].title, "A");
    assert!(movies[1].is_watched);
    assert_eq!(movies[1].rating, Rating::Pg13);
    assert_eq!(movies[1].date_added.timestamp_millis(), 1_700_000_000_000);
    assert!(movies.iter().all(|m| !m.poster_url.is_empty()));
}

#[test]
fn test_reset_and_reseed() {
    let blobs = MemoryBlobStore::new();
    let mut store = store_with_one_movie(&blobs);
    store.create(payload("Extra", Category::Horror)).unwrap();

    let seeded = store.reset_and_reseed();

    assert_eq!(seeded, seed_movies().len());
    assert_eq!(store.len(), seeded);
    assert!(store.get("existing").is_none());
    assert_eq!(blobs.get(MIGRATION_FLAG_KEY).unwrap().as_deref(), Some("1"));
    assert_eq!(stored_movies(&blobs).len(), seeded);
}

#[test]
fn test_data_survives_reopen() {
    let blobs = MemoryBlobStore::new();
    let created = {
        let mut store = store_with_one_movie(&blobs);
        store.create(payload("Persisted", Category::Adventure)).unwrap()
    };

    let reopened = MovieStore::open(Arc::new(blobs.clone()), PosterPolicy::default());
    assert_eq!(reopened.get(&created.id), Some(created));
    assert_eq!(reopened.len(), 2);
}
