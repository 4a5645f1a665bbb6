//! Error types for the Spotify API client.

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for all client operations.
#[derive(Debug, Error)]
pub enum SpotifyError {
    /// The HTTP exchange itself failed (connection, timeout, body read).
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status, so no body was decoded.
    #[error("{endpoint} returned status {status}")]
    Status {
        endpoint: String,
        status: StatusCode,
    },

    /// A body was received but does not match the expected shape.
    #[error("Failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    /// A required piece of local state is missing (e.g. the cached user id).
    #[error("Precondition failed: {0}")]
    Precondition(String),

    /// The genre catalog is too small to draw the requested distinct seeds.
    #[error("Not enough genre seeds: {available} available, {required} required")]
    NotEnoughGenres { available: usize, required: usize },

    /// No valid access token could be obtained.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A cached blob could not be (de)serialized.
    #[error("Cache error: {0}")]
    Cache(String),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Required configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SpotifyError {
    /// True for failures where no usable response body was obtained.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }

    /// True when a body arrived but could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, SpotifyError>;
