//! Configuration management for spotifly.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. Values that have a sensible default (the Web API
//! root, the request timeout) fall back to it; values that identify the
//! registered application (client id, redirect uri, ...) are required and
//! surface a [`SpotifyError::Config`] when missing.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::error::{Result, SpotifyError};

/// Default Spotify Web API root.
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

/// Every request is bounded by this timeout unless overridden.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Returns the application directory inside the platform data directory.
///
/// - Linux: `~/.local/share/spotifly`
/// - macOS: `~/Library/Application Support/spotifly`
/// - Windows: `%LOCALAPPDATA%/spotifly`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotifly");
    path
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory if it doesn't exist. A missing `.env` file is not an
/// error: the process environment alone may carry the configuration.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or an existing `.env`
/// file cannot be parsed.
///
/// # Example
///
/// ```
/// use spotifly::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<()> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| SpotifyError::Config(e.to_string()))?;
    }
    Ok(())
}

fn required(key: &str) -> Result<String> {
    env::var(key).map_err(|_| SpotifyError::Config(format!("{key} must be set")))
}

/// Returns the server address for the local OAuth callback server.
///
/// Reads `SERVER_ADDRESS`, e.g. `127.0.0.1:8080`.
pub fn server_addr() -> Result<String> {
    required("SERVER_ADDRESS")
}

/// Returns the Spotify API client ID (`SPOTIFY_API_AUTH_CLIENT_ID`).
pub fn spotify_client_id() -> Result<String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the OAuth redirect URI (`SPOTIFY_API_REDIRECT_URI`).
///
/// This must match the redirect URI registered in the Spotify application settings.
pub fn spotify_redirect_uri() -> Result<String> {
    required("SPOTIFY_API_REDIRECT_URI")
}

/// Returns the requested scope (`SPOTIFY_API_AUTH_SCOPE`).
///
/// Library and playlist editing need at least
/// `user-read-private user-library-read user-library-modify playlist-modify-private`.
pub fn spotify_scope() -> Result<String> {
    required("SPOTIFY_API_AUTH_SCOPE")
}

/// Returns the OAuth authorization URL (`SPOTIFY_API_AUTH_URL`).
pub fn spotify_apiauth_url() -> Result<String> {
    required("SPOTIFY_API_AUTH_URL")
}

/// Returns the OAuth token exchange URL (`SPOTIFY_API_TOKEN_URL`).
pub fn spotify_apitoken_url() -> Result<String> {
    required("SPOTIFY_API_TOKEN_URL")
}

/// Returns the Web API base URL (`SPOTIFY_API_URL`), defaulting to
/// [`DEFAULT_API_URL`].
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string())
}

/// Returns the request timeout (`SPOTIFY_API_TIMEOUT_SECS`), defaulting to
/// [`DEFAULT_TIMEOUT_SECS`]. Unparsable values fall back to the default.
pub fn spotify_timeout() -> Duration {
    let secs = env::var("SPOTIFY_API_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Settings the API client is constructed with.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, without trailing slash (e.g. `https://api.spotify.com/v1`).
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Builds the configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            base_url: spotify_apiurl(),
            timeout: spotify_timeout(),
        }
    }

    /// Same defaults, different API root. Mostly useful against a mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}
