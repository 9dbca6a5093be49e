use super::movies::print_movies;
use super::Session;
use crate::output::{Notice, Output};
use crate::WatchlistCommands;
use color_eyre::Result;
use movie_catalog_core::{Catalog, StoreError, ViewScope};

pub async fn run_watchlist(session: &Session, cmd: WatchlistCommands, output: &Output) -> Result<()> {
    let mut catalog = session.open_catalog()?;

    match cmd {
        WatchlistCommands::List { category } => {
            let movies = catalog.view(ViewScope::Watchlist, category);
            print_movies(&movies, &catalog.watchlist.ids(), category, output);
        }
        WatchlistCommands::Add { id } => {
            let title = title_of(&catalog, &id)?;
            if catalog.watchlist.add(&id) {
                output.success(membership(Notice::new(format!("Added {} to the watchlist", title)), &catalog, &id, &title));
            } else {
                output.info(membership(Notice::new(format!("{} is already on the watchlist", title)), &catalog, &id, &title));
            }
        }
        WatchlistCommands::Remove { id } => {
            // Ids of deleted movies may still be removed
            let title = catalog.movies.get(&id).map(|m| m.title).unwrap_or_else(|| id.clone());
            if catalog.watchlist.remove(&id) {
                output.success(membership(Notice::new(format!("Removed {} from the watchlist", title)), &catalog, &id, &title));
            } else {
                output.info(membership(Notice::new(format!("{} is not on the watchlist", title)), &catalog, &id, &title));
            }
        }
        WatchlistCommands::Toggle { id } => {
            let title = title_of(&catalog, &id)?;
            let notice = if catalog.watchlist.toggle(&id) {
                Notice::new(format!("Added {} to the watchlist", title))
            } else {
                Notice::new(format!("Removed {} from the watchlist", title))
            };
            output.success(membership(notice, &catalog, &id, &title));
        }
        WatchlistCommands::Clear => {
            let count = catalog.watchlist.len();
            if catalog.watchlist.clear() {
                output.success(Notice::new(format!("Cleared {} movies from the watchlist", count)).with("cleared", count));
            } else {
                output.info(Notice::new("Watchlist is already empty").with("cleared", 0));
            }
        }
    }

    Ok(())
}

fn membership(notice: Notice, catalog: &Catalog, id: &str, title: &str) -> Notice {
    notice
        .movie(id, title)
        .with("onWatchlist", catalog.watchlist.has(id))
        .with("watchlistSize", catalog.watchlist.len())
}

/// Only movies in the catalog can be put on the watchlist from the command line
fn title_of(catalog: &Catalog, id: &str) -> Result<String, StoreError> {
    catalog
        .movies
        .get(id)
        .map(|m| m.title)
        .ok_or_else(|| StoreError::not_found(id))
}
