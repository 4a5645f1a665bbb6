use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use spotifly::{cli, config, error, types::PkceToken};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightGreen.on_default())
        .placeholder(AnsiColor::BrightBlue.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Show and cache your profile
    Me,

    /// Browse new releases, featured playlists and categories
    #[command(subcommand)]
    Browse(BrowseCommand),

    /// List available genre seeds
    Genres,

    /// Recommendations seeded by five random genres
    Recommendations(RecommendationsOptions),

    /// Show a single album
    Album(AlbumOptions),

    /// Handle saved albums
    Albums(AlbumsOptions),

    /// Handle your playlists
    Playlists(PlaylistsOptions),

    /// Search tracks, playlists, albums and artists
    Search(SearchOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Subcommand, Debug, Clone)]
pub enum BrowseCommand {
    /// Newly released albums
    Releases {
        #[clap(long, default_value_t = 10)]
        limit: u32,
    },

    /// Featured playlists
    Featured {
        #[clap(long, default_value_t = 10)]
        limit: u32,
    },

    /// Browse categories
    Categories,

    /// Playlists of a browse category
    Category { id: String },
}

#[derive(Parser, Debug, Clone)]
pub struct RecommendationsOptions {
    #[clap(long, default_value_t = 15)]
    pub limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct AlbumOptions {
    pub id: String,
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Handle saved albums",
    args_conflicts_with_subcommands = true // listing flags or `save`, not both
)]
pub struct AlbumsOptions {
    /// Number of saved albums to list
    #[clap(long, default_value_t = 5)]
    pub limit: u32,

    #[command(subcommand)]
    pub command: Option<AlbumsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AlbumsSubcommand {
    /// Save an album to your library
    Save { id: String },
}

#[derive(Parser, Debug, Clone)]
#[command(
    about = "Handle your playlists",
    args_conflicts_with_subcommands = true // listing flags or a subcommand, not both
)]
pub struct PlaylistsOptions {
    /// Number of playlists to list
    #[clap(long, default_value_t = 5)]
    pub limit: u32,

    #[command(subcommand)]
    pub command: Option<PlaylistsSubcommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlaylistsSubcommand {
    /// Show a playlist with its tracks
    Show { id: String },

    /// List the tracks of a playlist
    Tracks { id: String },

    /// Create a private playlist
    Create { name: String },

    /// Add a track to a playlist
    Add {
        playlist_id: String,
        /// Track URI, e.g. spotify:track:4iV5W9uYEdYUVa79Axb7Rh
        track_uri: String,
    },

    /// Remove a track from a playlist
    Remove {
        playlist_id: String,
        track_uri: String,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct SearchOptions {
    pub query: String,

    /// Results per category
    #[clap(long, default_value_t = 2)]
    pub limit: u32,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Me => cli::me().await,

        Command::Browse(browse) => match browse {
            BrowseCommand::Releases { limit } => cli::new_releases(limit).await,
            BrowseCommand::Featured { limit } => cli::featured_playlists(limit).await,
            BrowseCommand::Categories => cli::categories().await,
            BrowseCommand::Category { id } => cli::category_playlists(id).await,
        },

        Command::Genres => cli::genres().await,
        Command::Recommendations(opt) => cli::recommendations(opt.limit).await,

        Command::Album(opt) => cli::album(opt.id).await,
        Command::Albums(opt) => match opt.command {
            Some(AlbumsSubcommand::Save { id }) => cli::save_album(id).await,
            None => cli::saved_albums(opt.limit).await,
        },

        Command::Playlists(opt) => match opt.command {
            Some(PlaylistsSubcommand::Show { id }) => cli::playlist(id).await,
            Some(PlaylistsSubcommand::Tracks { id }) => cli::playlist_tracks(id).await,
            Some(PlaylistsSubcommand::Create { name }) => cli::create_playlist(name).await,
            Some(PlaylistsSubcommand::Add {
                playlist_id,
                track_uri,
            }) => cli::add_track(playlist_id, track_uri).await,
            Some(PlaylistsSubcommand::Remove {
                playlist_id,
                track_uri,
            }) => cli::remove_track(playlist_id, track_uri).await,
            None => cli::playlists(opt.limit).await,
        },

        Command::Search(opt) => cli::search(opt.query, opt.limit).await,

        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
