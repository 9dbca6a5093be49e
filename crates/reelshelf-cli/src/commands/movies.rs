use super::{styled_table, Session};
use crate::output::{Notice, Output};
use color_eyre::Result;
use comfy_table::{Attribute, Cell, Color};
use movie_catalog_core::{CategoryFilter, StoreError, ViewScope, WatchlistSet};
use movie_catalog_models::{MoviePatch, MovieRecord, NewMovie};
use owo_colors::OwoColorize;
use serde_json::json;

pub async fn run_list(session: &Session, filter: CategoryFilter, watchlist_only: bool, output: &Output) -> Result<()> {
    let catalog = session.open_catalog()?;
    let scope = if watchlist_only { ViewScope::Watchlist } else { ViewScope::Catalog };
    let movies = catalog.view(scope, filter);

    print_movies(&movies, &catalog.watchlist.ids(), filter, output);
    Ok(())
}

pub(crate) fn print_movies(movies: &[MovieRecord], watchlist: &WatchlistSet, filter: CategoryFilter, output: &Output) {
    if output.is_json() {
        output.json(&json!({
            "filter": filter.to_string(),
            "count": movies.len(),
            "movies": movies,
        }));
        return;
    }

    if movies.is_empty() {
        output.info(Notice::new(format!("No movies found ({})", filter)).with("filter", filter.to_string()));
        return;
    }
    if output.is_quiet() {
        return;
    }

    let mut table = styled_table();
    table.set_header(
        ["ID", "Title", "Year", "Category", "Rating", "IMDb", "Watchlist", "Watched"]
            .into_iter()
            .map(|h| Cell::new(h).add_attribute(Attribute::Bold)),
    );
    for movie in movies {
        table.add_row(vec![
            Cell::new(&movie.id).fg(Color::DarkGrey),
            Cell::new(&movie.title),
            Cell::new(movie.release_year),
            Cell::new(movie.category),
            Cell::new(movie.rating),
            Cell::new(format_imdb(movie.imdb_rating)),
            Cell::new(mark(watchlist.contains(&movie.id), "★")),
            Cell::new(mark(movie.is_watched, "✓")),
        ]);
    }
    println!("{}", table);
    println!("{} {} ({})", movies.len().bright_cyan(), "movies".bright_black(), filter);
}

pub async fn run_show(session: &Session, id: &str, output: &Output) -> Result<()> {
    let catalog = session.open_catalog()?;
    let movie = catalog.movies.get(id).ok_or_else(|| StoreError::not_found(id))?;
    let on_watchlist = catalog.watchlist.has(id);

    if output.is_json() {
        output.json(&json!({
            "movie": movie,
            "onWatchlist": on_watchlist,
        }));
        return Ok(());
    }
    if output.is_quiet() {
        return Ok(());
    }

    let mut table = styled_table();
    table.set_header(vec![
        Cell::new(&movie.title).fg(Color::Cyan).add_attribute(Attribute::Bold),
        Cell::new(movie.release_year),
    ]);
    table.add_row(vec![Cell::new("ID"), Cell::new(&movie.id)]);
    table.add_row(vec![Cell::new("Category"), Cell::new(movie.category)]);
    table.add_row(vec![Cell::new("Rating"), Cell::new(movie.rating)]);
    table.add_row(vec![Cell::new("Duration"), Cell::new(format_duration(movie.duration))]);
    table.add_row(vec![Cell::new("Director"), Cell::new(movie.director.as_deref().unwrap_or("-"))]);
    table.add_row(vec![Cell::new("Cast"), Cell::new(format_cast(movie.cast.as_deref()))]);
    table.add_row(vec![Cell::new("IMDb"), Cell::new(format_imdb(movie.imdb_rating))]);
    table.add_row(vec![Cell::new("Poster"), Cell::new(&movie.poster_url)]);
    table.add_row(vec![
        Cell::new("Added"),
        Cell::new(movie.date_added.format("%Y-%m-%d %H:%M UTC")),
    ]);
    table.add_row(vec![Cell::new("Watchlist"), Cell::new(mark(on_watchlist, "★"))]);
    table.add_row(vec![Cell::new("Watched"), Cell::new(mark(movie.is_watched, "✓"))]);
    println!("{}", table);

    if !movie.description.is_empty() {
        println!();
        println!("{}", movie.description);
    }
    Ok(())
}

pub async fn run_add(session: &Session, payload: NewMovie, output: &Output) -> Result<()> {
    let mut catalog = session.open_catalog()?;
    let movie = catalog.movies.create(payload)?;

    output.success(Notice::new(format!("Added {} ({})", movie.title, movie.id)).movie(&movie.id, &movie.title));
    Ok(())
}

pub async fn run_update(session: &Session, id: &str, patch: MoviePatch, output: &Output) -> Result<()> {
    let mut catalog = session.open_catalog()?;
    if patch.is_empty() {
        output.warn("No fields given, nothing to update");
    }
    let movie = catalog.movies.update(id, patch)?;

    output.success(
        Notice::new(format!("Updated {} ({})", movie.title, movie.id))
            .movie(&movie.id, &movie.title)
            .with("isWatched", movie.is_watched)
            .with("posterUrl", movie.poster_url.as_str()),
    );
    Ok(())
}

pub async fn run_delete(session: &Session, id: &str, output: &Output) -> Result<()> {
    let mut catalog = session.open_catalog()?;
    let title = catalog.movies.get(id).map(|m| m.title).unwrap_or_else(|| id.to_string());
    catalog.movies.delete(id)?;

    output.success(
        Notice::new(format!("Deleted {}", title))
            .movie(id, &title)
            .with("onWatchlist", catalog.watchlist.has(id)),
    );
    Ok(())
}

fn mark(on: bool, glyph: &str) -> String {
    if on {
        glyph.green().to_string()
    } else {
        "-".bright_black().to_string()
    }
}

fn format_imdb(score: Option<f32>) -> String {
    score.map(|s| format!("{:.1}", s)).unwrap_or_else(|| "-".to_string())
}

fn format_duration(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m >= 60 => format!("{}h {:02}m", m / 60, m % 60),
        Some(m) => format!("{}m", m),
        None => "-".to_string(),
    }
}

fn format_cast(cast: Option<&[String]>) -> String {
    match cast {
        Some(names) if !names.is_empty() => names.join(", "),
        _ => "-".to_string(),
    }
}
