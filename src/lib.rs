//! spotifly library
//!
//! This library provides an authenticated client for the Spotify Web API and
//! the command-line front end built on it: browsing new releases, featured
//! playlists and categories, genre-seeded recommendations, album and playlist
//! management, and search.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local sign-in callback server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - The client's error taxonomy
//! - `management` - Token gate and cached user profile
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - PKCE and formatting helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use spotifly::{config, management::{ProfileManager, TokenManager}, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> spotifly::Res<()> {
//!     config::load_env().await?;
//!     let gate = Arc::new(TokenManager::load().await?);
//!     let client = SpotifyClient::new(
//!         config::ClientConfig::from_env(),
//!         gate,
//!         ProfileManager::default_location(),
//!     )?;
//!     let results = client.search("daft punk", 2).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

pub use error::SpotifyError;
pub use spotify::SpotifyClient;

/// Boxed result used at the top of the CLI, where any error is reported and
/// the process exits. Library code returns [`error::Result`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints a status line with a blue `o`.
///
/// ```
/// info!("Fetching {} new releases...", limit);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a status line with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a red `!` line and exits with status 1.
///
/// Only for the CLI layer; library code returns errors instead.
///
/// ```
/// error!("Failed to load token. Please run spotifly auth\n Error: {}", e);
/// // unreachable
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a yellow `!` line for recoverable problems.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
