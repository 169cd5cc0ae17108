use clap::{ArgAction, Parser, Subcommand};
use commands::{browse, catalog, config, details, watchlist};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Marquee - browse movies and series from the command line")]
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

    /// Write logs to this file (daily rotation) instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse titles with the persisted filters
    #[command(long_about = "Browse titles using the persisted filter state. Flags update the stored filters before fetching: a search query takes precedence over a selected genre, which takes precedence over plain popularity discovery.")]
    Browse {
        /// Set the search query (empty string clears it)
        #[arg(long)]
        query: Option<String>,

        /// Select a genre by id (see `marquee genres`)
        #[arg(long, value_name = "ID")]
        genre: Option<u64>,

        /// Lower release-year bound
        #[arg(long, value_name = "YEAR")]
        from: Option<u16>,

        /// Upper release-year bound
        #[arg(long, value_name = "YEAR")]
        to: Option<u16>,

        /// How many pages to accumulate
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Reset all filters to defaults first
        #[arg(long, action = ArgAction::SetTrue)]
        clear: bool,
    },
    /// Show this week's trending titles
    Trending {
        /// Trending series instead of movies
        #[arg(long, action = ArgAction::SetTrue)]
        tv: bool,
    },
    /// Show the full detail record for a title
    #[command(long_about = "Fetch and display the detail record for one title. The title id is recorded in the recently-viewed history.")]
    Details {
        /// Title id
        id: u64,

        /// The id refers to a series, not a movie
        #[arg(long, action = ArgAction::SetTrue)]
        tv: bool,
    },
    /// Show the cast of a title
    Credits {
        /// Title id
        id: u64,

        /// The id refers to a series, not a movie
        #[arg(long, action = ArgAction::SetTrue)]
        tv: bool,
    },
    /// Show a person and the movies they appeared in
    Person {
        /// Person id
        id: u64,
    },
    /// List the genre catalog
    Genres,
    /// Manage the watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: WatchlistCommands,
    },
    /// Show recently viewed title ids (most recent first)
    Recent,
    /// Show or initialize the configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// List saved titles
    List,
    /// Add a title by id (snapshots the current details)
    Add {
        id: u64,
        /// The id refers to a series, not a movie
        #[arg(long, action = ArgAction::SetTrue)]
        tv: bool,
    },
    /// Remove a title by id
    Remove { id: u64 },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show effective configuration and file locations
    Show,
    /// Write a starter config file
    Init,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(cli.verbose, cli.quiet, cli.log_file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Browse {
            query,
            genre,
            from,
            to,
            pages,
            clear,
        } => browse::run_browse(query, genre, from, to, pages, clear, &output).await,
        Commands::Trending { tv } => catalog::run_trending(tv, &output).await,
        Commands::Details { id, tv } => details::run_details(id, tv, &output).await,
        Commands::Credits { id, tv } => details::run_credits(id, tv, &output).await,
        Commands::Person { id } => catalog::run_person(id, &output).await,
        Commands::Genres => catalog::run_genres(&output).await,
        Commands::Watchlist { cmd } => match cmd {
            WatchlistCommands::List => watchlist::run_list(&output).await,
            WatchlistCommands::Add { id, tv } => watchlist::run_add(id, tv, &output).await,
            WatchlistCommands::Remove { id } => watchlist::run_remove(id, &output).await,
        },
        Commands::Recent => watchlist::run_recent(&output).await,
        Commands::Config { cmd } => match cmd.unwrap_or(ConfigCommands::Show) {
            ConfigCommands::Show => config::run_show(&output).await,
            ConfigCommands::Init => config::run_init(&output).await,
        },
    }
}
