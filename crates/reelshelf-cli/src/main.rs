use clap::{ArgAction, Args, Parser, Subcommand};
use commands::{config, movies, reset, watchlist, Session};
use movie_catalog_core::{CategoryFilter, StoreError};
use movie_catalog_models::{Category, Rating};

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "reelshelf")]
#[command(about = "ReelShelf - a local movie catalog with a watchlist")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List movies in the catalog
    #[command(long_about = "List the movies in the catalog, optionally restricted to one category or to the movies on your watchlist.")]
    List {
        /// Category to show, or "All"
        #[arg(long, short, default_value = "All")]
        category: CategoryFilter,

        /// Only movies on the watchlist
        #[arg(long, action = ArgAction::SetTrue)]
        watchlist: bool,
    },
    /// Show every field of one movie
    Show {
        id: String,
    },
    /// Add a movie to the catalog
    Add(AddArgs),
    /// Change fields of an existing movie
    #[command(long_about = "Update an existing movie. Only the fields given on the command line are changed; the id and the date the movie was added never change.")]
    Update(UpdateArgs),
    /// Remove a movie from the catalog
    Delete {
        id: String,
    },
    /// Manage the watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: WatchlistCommands,
    },
    /// Drop all stored movies and restore the built-in catalog (development helper)
    #[command(long_about = "Remove the stored catalog and the poster migration marker, then reseed the built-in movies and run the poster migration again. The watchlist is left untouched.")]
    Reset {
        /// Skip the confirmation check
        #[arg(long, action = ArgAction::SetTrue)]
        yes: bool,
    },
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    title: String,

    /// Release year (1888 or later)
    #[arg(long)]
    year: u16,

    #[arg(long)]
    category: Category,

    #[arg(long)]
    rating: Rating,

    #[arg(long)]
    description: Option<String>,

    /// Runtime in minutes
    #[arg(long)]
    duration: Option<u32>,

    #[arg(long)]
    director: Option<String>,

    /// Comma-separated cast list
    #[arg(long)]
    cast: Option<String>,

    #[arg(long)]
    imdb_rating: Option<f32>,

    /// Poster image URL (relative and protocol-less URLs are accepted)
    #[arg(long)]
    poster: Option<String>,
}

#[derive(Args)]
struct UpdateArgs {
    id: String,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    year: Option<u16>,

    #[arg(long)]
    category: Option<Category>,

    #[arg(long)]
    rating: Option<Rating>,

    #[arg(long)]
    description: Option<String>,

    #[arg(long)]
    duration: Option<u32>,

    #[arg(long)]
    director: Option<String>,

    /// Comma-separated cast list
    #[arg(long)]
    cast: Option<String>,

    #[arg(long)]
    imdb_rating: Option<f32>,

    #[arg(long)]
    poster: Option<String>,

    /// Mark as watched or unwatched
    #[arg(long)]
    watched: Option<bool>,
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// Show movies on the watchlist
    List {
        #[arg(long, short, default_value = "All")]
        category: CategoryFilter,
    },
    /// Add a movie by id
    Add { id: String },
    /// Remove a movie by id
    Remove { id: String },
    /// Add the movie if absent, remove it if present
    Toggle { id: String },
    /// Empty the watchlist
    Clear,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show the effective configuration and file locations
    Show,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let session = Session::load()?;

    // Initialize logging with verbose level
    let log_file = session.config.log_file(&session.paths);
    logging::init_logging(cli.verbose, cli.quiet, &session.config.logging, log_file.as_deref())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    // Create output handler
    let output = output::Output::new(cli.output, cli.quiet);

    let result = match cli.command {
        Commands::List { category, watchlist } => movies::run_list(&session, category, watchlist, &output).await,
        Commands::Show { id } => movies::run_show(&session, &id, &output).await,
        Commands::Add(args) => movies::run_add(&session, args.into(), &output).await,
        Commands::Update(args) => {
            let (id, patch) = args.into_patch();
            movies::run_update(&session, &id, patch, &output).await
        }
        Commands::Delete { id } => movies::run_delete(&session, &id, &output).await,
        Commands::Watchlist { cmd } => watchlist::run_watchlist(&session, cmd, &output).await,
        Commands::Reset { yes } => reset::run_reset(&session, yes, &output).await,
        Commands::Config { cmd } => config::run_config(&session, cmd.unwrap_or(ConfigCommands::Show), &output).await,
    };

    // Missing ids and rejected payloads are user errors, not crashes
    if let Err(report) = &result {
        if let Some(store_err) = report.downcast_ref::<StoreError>() {
            output.error(store_err);
            std::process::exit(1);
        }
    }
    result
}

impl From<AddArgs> for movie_catalog_models::NewMovie {
    fn from(args: AddArgs) -> Self {
        Self {
            title: args.title,
            description: args.description.unwrap_or_default(),
            release_year: args.year,
            category: args.category,
            rating: args.rating,
            duration: args.duration,
            director: args.director,
            cast: args.cast.as_deref().map(movie_catalog_models::NewMovie::parse_cast),
            imdb_rating: args.imdb_rating,
            poster_url: args.poster,
        }
    }
}

impl UpdateArgs {
    fn into_patch(self) -> (String, movie_catalog_models::MoviePatch) {
        let patch = movie_catalog_models::MoviePatch {
            title: self.title,
            description: self.description,
            release_year: self.year,
            category: self.category,
            rating: self.rating,
            duration: self.duration,
            director: self.director,
            cast: self.cast.as_deref().map(movie_catalog_models::NewMovie::parse_cast),
            imdb_rating: self.imdb_rating,
            poster_url: self.poster,
            is_watched: self.watched,
        };
        (self.id, patch)
    }
}
