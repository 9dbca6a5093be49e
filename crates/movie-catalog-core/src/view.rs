use movie_catalog_models::{Category, MovieRecord};
use std::fmt;
use std::str::FromStr;

use crate::live::Subscription;
use crate::watchlist_store::WatchlistSet;

/// Category selection where `All` matches everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    pub fn matches(&self, movie: &MovieRecord) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => movie.category == *category,
        }
    }

    /// "All" followed by every category, in display order
    pub fn choices() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = movie_catalog_models::ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewScope {
    /// Every movie in the catalog
    #[default]
    Catalog,
    /// Only movies whose id is on the watchlist
    Watchlist,
}

/// Project the catalog through scope and filter, keeping catalog order. Never fails.
pub fn compose(
    movies: &[MovieRecord],
    watchlist: &WatchlistSet,
    scope: ViewScope,
    filter: CategoryFilter,
) -> Vec<MovieRecord> {
    movies
        .iter()
        .filter(|m| scope == ViewScope::Catalog || watchlist.contains(&m.id))
        .filter(|m| filter.matches(m))
        .cloned()
        .collect()
}

/// Recomputes a projection whenever the catalog or the watchlist changes
pub struct LiveView {
    movies: Subscription<Vec<MovieRecord>>,
    watchlist: Subscription<WatchlistSet>,
    scope: ViewScope,
    filter: CategoryFilter,
    primed: bool,
    movies_closed: bool,
    watchlist_closed: bool,
}

impl LiveView {
    pub fn new(
        movies: Subscription<Vec<MovieRecord>>,
        watchlist: Subscription<WatchlistSet>,
        scope: ViewScope,
        filter: CategoryFilter,
    ) -> Self {
        Self {
            movies,
            watchlist,
            scope,
            filter,
            primed: false,
            movies_closed: false,
            watchlist_closed: false,
        }
    }

    pub fn scope(&self) -> ViewScope {
        self.scope
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn set_scope(&mut self, scope: ViewScope) {
        self.scope = scope;
    }

    pub fn set_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    /// The projection over the latest values of both sources
    pub fn current(&mut self) -> Vec<MovieRecord> {
        let movies = self.movies.latest();
        let watchlist = self.watchlist.latest();
        compose(&movies, &watchlist, self.scope, self.filter)
    }

    /// First call yields the current projection; later calls wait for either source to change.
    /// `None` once both sources are gone.
    pub async fn next(&mut self) -> Option<Vec<MovieRecord>> {
        if !self.primed {
            self.primed = true;
            return Some(self.current());
        }

        loop {
            if self.movies_closed && self.watchlist_closed {
                return None;
            }
            tokio::select! {
                open = self.movies.changed(), if !self.movies_closed => {
                    if open {
                        break;
                    }
                    self.movies_closed = true;
                }
                open = self.watchlist.changed(), if !self.watchlist_closed => {
                    if open {
                        break;
                    }
                    self.watchlist_closed = true;
                }
            }
        }

        Some(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::MemoryBlobStore;
    use crate::movie_store::MovieStore;
    use crate::poster::PosterPolicy;
    use crate::watchlist_store::WatchlistStore;
    use chrono::Utc;
    use movie_catalog_models::{NewMovie, Rating};
    use std::sync::Arc;

    fn movie(id: &str, category: Category) -> MovieRecord {
        MovieRecord {
            id: id.to_string(),
            title: format!("Movie {}", id),
            description: String::new(),
            release_year: 2000,
            category,
            rating: Rating::Pg,
            duration: None,
            director: None,
            cast: None,
            imdb_rating: None,
            poster_url: "https://placehold.co/400x600?text=No+Image".to_string(),
            date_added: Utc::now(),
            is_watched: false,
        }
    }

    #[test]
    fn test_watchlist_scope_with_category_filter() {
        let catalog = vec![movie("1", Category::Action), movie("2", Category::Drama)];
        let watchlist = WatchlistSet::from(["1".to_string()]);

        let all = compose(&catalog, &watchlist, ViewScope::Watchlist, CategoryFilter::All);
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "1");

        let drama = compose(&catalog, &watchlist, ViewScope::Watchlist, Category::Drama.into());
        assert!(drama.is_empty());
    }

    #[test]
    fn test_catalog_scope_ignores_watchlist() {
        let catalog = vec![
            movie("1", Category::Action),
            movie("2", Category::Drama),
            movie("3", Category::Action),
        ];
        let watchlist = WatchlistSet::new();

        let all = compose(&catalog, &watchlist, ViewScope::Catalog, CategoryFilter::All);
        assert_eq!(all.len(), 3);

        let action: Vec<_> = compose(&catalog, &watchlist, ViewScope::Catalog, Category::Action.into())
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(action, vec!["1".to_string(), "3".to_string()]);
    }

    #[test]
    fn test_watchlist_ids_without_movies_are_ignored() {
        let catalog = vec![movie("1", Category::Comedy)];
        let watchlist = WatchlistSet::from(["deleted".to_string()]);
        assert!(compose(&catalog, &watchlist, ViewScope::Watchlist, CategoryFilter::All).is_empty());
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("All".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "drama".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(Category::Drama))
        );
        assert!("nope".parse::<CategoryFilter>().is_err());
        assert_eq!(CategoryFilter::choices().len(), Category::ALL.len() + 1);
    }

    #[tokio::test]
    async fn test_live_view_recomputes_on_either_source() {
        let blobs = Arc::new(MemoryBlobStore::new());
        let mut movies = MovieStore::open(blobs.clone(), PosterPolicy::default());
        let mut watchlist = WatchlistStore::open(blobs);

        let mut view = LiveView::new(
            movies.subscribe(),
            watchlist.subscribe(),
            ViewScope::Watchlist,
            CategoryFilter::All,
        );
        assert_eq!(view.next().await, Some(Vec::new()));

        let created = movies
            .create(NewMovie::new("Paddington", 2014, Category::Comedy, Rating::Pg))
            .unwrap();
        // catalog changed, but the movie is not on the watchlist yet
        assert_eq!(view.next().await, Some(Vec::new()));

        watchlist.add(&created.id);
        let shown = view.next().await.unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].id, created.id);

        view.set_filter(CategoryFilter::Only(Category::Horror));
        assert!(view.current().is_empty());
        view.set_filter(CategoryFilter::Only(Category::Comedy));
        assert_eq!(view.current().len(), 1);

        movies.delete(&created.id).unwrap();
        assert_eq!(view.next().await, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_live_view_ends_when_sources_dropped() {
        let blobs = Arc::new(MemoryBlobStore::new());
        let movies = MovieStore::open(blobs.clone(), PosterPolicy::default());
        let watchlist = WatchlistStore::open(blobs);
        let mut view = LiveView::new(
            movies.subscribe(),
            watchlist.subscribe(),
            ViewScope::Catalog,
            CategoryFilter::All,
        );
        assert!(view.next().await.is_some());

        drop(movies);
        drop(watchlist);
        assert_eq!(view.next().await, None);
    }
}
