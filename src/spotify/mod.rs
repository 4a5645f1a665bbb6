//! # Spotify Integration Module
//!
//! This module is the Web API access layer of spotifly. [`SpotifyClient`] turns
//! each logical operation (get profile, list new releases, save an album,
//! search, ...) into exactly one authenticated HTTP request and one typed
//! result.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! SpotifyClient ──→ TokenGate (valid bearer token, refresh if needed)
//!     ├── Profile          (/me)
//!     ├── Browse           (new releases, featured, categories)
//!     ├── Recommendations  (genre seeds + recommendations)
//!     ├── Albums           (detail, library, save)
//!     ├── Playlists        (detail, tracks, create, add/remove)
//!     └── Search           (merged tagged results)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Request lifecycle
//!
//! 1. **Token**: the injected [`TokenGate`] is awaited first. If it fails, no
//!    request is sent.
//! 2. **Request**: method + `{base_url}{endpoint}` + `Authorization: Bearer`;
//!    requests with a body are sent as JSON.
//! 3. **Dispatch**: one attempt, bounded by the configured timeout (30 s by
//!    default). There are no retries and nothing is cached.
//! 4. **Decode**: a non-success status becomes [`SpotifyError::Status`], a
//!    failed exchange [`SpotifyError::Transport`], and a body of the wrong
//!    shape [`SpotifyError::Decode`]. Decoding is all-or-nothing.
//!
//! ## Thread Safety
//!
//! The client is `Clone + Send + Sync`. It owns no mutable state: the reqwest
//! connection pool and the gate are shared, and concurrent operations do not
//! coordinate with each other. Serializing token refreshes is the gate's job.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use spotifly::{config::ClientConfig, management::{ProfileManager, TokenManager}, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() -> spotifly::Res<()> {
//!     let gate = Arc::new(TokenManager::load().await?);
//!     let client = SpotifyClient::new(ClientConfig::from_env(), gate, ProfileManager::default_location())?;
//!
//!     let releases = client.new_releases(10).await?;
//!     for album in releases.albums.items {
//!         println!("{}", album.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod albums;
pub mod auth;
pub mod browse;
mod gate;
pub mod playlists;
pub mod profile;
pub mod recommendations;
pub mod search;

pub use gate::{StaticToken, TokenGate};
pub use recommendations::sample_genre_seeds;
pub use search::merge_search_results;

use std::sync::Arc;

use reqwest::{Client, Method, RequestBuilder, Response, header::CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use crate::{
    config::ClientConfig,
    error::{Result, SpotifyError},
    management::ProfileManager,
};

/// Authenticated Spotify Web API client.
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    base_url: String,
    gate: Arc<dyn TokenGate>,
    profiles: ProfileManager,
}

impl SpotifyClient {
    /// Creates a client with injected dependencies.
    ///
    /// # Errors
    ///
    /// Returns [`SpotifyError::Config`] if the HTTP client cannot be built.
    pub fn new(
        config: ClientConfig,
        gate: Arc<dyn TokenGate>,
        profiles: ProfileManager,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SpotifyError::Config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            gate,
            profiles,
        })
    }

    pub fn profiles(&self) -> &ProfileManager {
        &self.profiles
    }

    /// Reads the user id from the cached profile.
    ///
    /// # Errors
    ///
    /// [`SpotifyError::Precondition`] if no profile is cached or the blob
    /// cannot be read.
    pub async fn cached_user_id(&self) -> Result<String> {
        match self.profiles.load().await {
            Ok(Some(profile)) => Ok(profile.id),
            Ok(None) => Err(SpotifyError::Precondition(
                "no cached user profile; fetch the current profile first".to_string(),
            )),
            Err(e) => Err(SpotifyError::Precondition(format!(
                "cached user profile is unreadable: {e}"
            ))),
        }
    }

    /// Waits for a valid token, then starts an authenticated request.
    async fn request(&self, method: Method, endpoint: &str) -> Result<RequestBuilder> {
        let token = self.gate.valid_token().await?;
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("{} {}", method, url);

        Ok(self.http.request(method, url).bearer_auth(token))
    }

    async fn dispatch(&self, request: RequestBuilder, endpoint: &str) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            warn!("Request to {} failed: {}", endpoint, e);
            SpotifyError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} returned status {}", endpoint, status);
            return Err(SpotifyError::Status {
                endpoint: endpoint.to_string(),
                status,
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response, endpoint: &str) -> Result<T> {
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| {
            warn!("Cannot decode {} response: {}", endpoint, source);
            SpotifyError::Decode {
                endpoint: endpoint.to_string(),
                source,
            }
        })
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, String)]) -> Result<T> {
        let request = self.request(Method::GET, endpoint).await?.query(query);
        let response = self.dispatch(request, endpoint).await?;
        Self::decode(response, endpoint).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        let request = self.request(method, endpoint).await?.json(body);
        let response = self.dispatch(request, endpoint).await?;
        Self::decode(response, endpoint).await
    }

    /// Bodyless mutation whose response body is irrelevant.
    async fn send_empty(&self, method: Method, endpoint: &str, query: &[(&str, String)]) -> Result<()> {
        let request = self
            .request(method, endpoint)
            .await?
            .query(query)
            .header(CONTENT_TYPE, "application/json");
        self.dispatch(request, endpoint).await?;
        Ok(())
    }
}
