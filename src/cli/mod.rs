//! # CLI Module
//!
//! The command-line layer of spotifly. Each public function implements one
//! subcommand: it builds a [`SpotifyClient`] from the cached token and the
//! environment, calls exactly one client operation, and renders the result
//! as a table or a status line.
//!
//! ## Command Categories
//!
//! - **Authentication**: [`auth`], [`me`]
//! - **Browse**: [`new_releases`], [`featured_playlists`], [`categories`],
//!   [`category_playlists`]
//! - **Recommendations**: [`genres`], [`recommendations`]
//! - **Albums**: [`album`], [`saved_albums`], [`save_album`]
//! - **Playlists**: [`playlists`], [`playlist`], [`playlist_tracks`],
//!   [`create_playlist`], [`add_track`], [`remove_track`]
//! - **Search**: [`search`]
//!
//! ## Error presentation
//!
//! Failures end the process through the `error!` macro with a hint on how to
//! recover (e.g. run `spotifly auth`, or `spotifly me` to cache the profile
//! that playlist commands need).
//!
//! ```bash
//! spotifly auth                        # sign in, caches token and profile
//! spotifly browse releases --limit 10  # new releases
//! spotifly search "daft punk"          # tracks, playlists, albums, artists
//! spotifly playlists create "Late Night"
//! ```

mod albums;
mod auth;
mod browse;
mod playlists;
mod profile;
mod recommendations;
mod search;

pub use albums::{album, save_album, saved_albums};
pub use auth::auth;
pub use browse::{categories, category_playlists, featured_playlists, new_releases};
pub use playlists::{add_track, create_playlist, playlist, playlist_tracks, playlists, remove_track};
pub use profile::me;
pub use recommendations::{genres, recommendations};
pub use search::search;

use std::{sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config::ClientConfig,
    error,
    error::SpotifyError,
    management::{ProfileManager, TokenManager},
    spotify::SpotifyClient,
};

/// Builds a client around the cached token. Exits when no token is cached.
pub(crate) async fn client() -> SpotifyClient {
    let token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run spotifly auth\n Error: {}",
                e
            );
        }
    };

    match SpotifyClient::new(
        ClientConfig::from_env(),
        Arc::new(token_mgr),
        ProfileManager::default_location(),
    ) {
        Ok(client) => client,
        Err(e) => error!("Cannot create API client. Err: {}", e),
    }
}

pub(crate) fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}

/// Terminates with a message tailored to the failure kind.
pub(crate) fn fail(action: &str, err: SpotifyError) -> ! {
    match err {
        SpotifyError::Precondition(_) => error!(
            "Cannot {}: no cached profile. Run spotifly me first.\n Error: {}",
            action, err
        ),
        SpotifyError::Auth(_) => error!(
            "Cannot {}: not signed in. Run spotifly auth.\n Error: {}",
            action, err
        ),
        other => error!("Cannot {}. Err: {}", action, other),
    }
}
