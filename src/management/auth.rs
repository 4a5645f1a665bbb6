use std::{path::PathBuf, time::Duration};

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::{
    config,
    error::{Result, SpotifyError},
    spotify::TokenGate,
    types::Token,
};

/// Tokens are refreshed this many seconds before they actually expire.
const EXPIRY_MARGIN_SECS: u64 = 240;

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
    refresh_token: Option<String>,
    scope: Option<String>,
    expires_in: Option<u64>,
}

pub struct TokenManager {
    token: Mutex<Token>,
    token_url: String,
    client_id: String,
    path: PathBuf,
    http: Client,
}

impl TokenManager {
    pub fn new(token: Token, token_url: String, client_id: String) -> Self {
        TokenManager {
            token: Mutex::new(token),
            token_url,
            client_id,
            path: Self::token_path(),
            http: refresh_client(config::spotify_timeout()),
        }
    }

    /// Bounds each refresh request. The gate lock is held while it runs.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = refresh_client(timeout);
        self
    }

    pub fn with_path(mut self, path: PathBuf) -> Self {
        self.path = path;
        self
    }

    /// Loads the cached token, using the configured token endpoint and client id.
    pub async fn load() -> Result<Self> {
        let token_url = config::spotify_apitoken_url()?;
        let client_id = config::spotify_client_id()?;
        Self::load_from(Self::token_path(), token_url, client_id).await
    }

    pub async fn load_from(path: PathBuf, token_url: String, client_id: String) -> Result<Self> {
        let content = async_fs::read_to_string(&path).await?;
        let token: Token =
            serde_json::from_str(&content).map_err(|e| SpotifyError::Cache(e.to_string()))?;
        Ok(Self::new(token, token_url, client_id).with_path(path))
    }

    pub async fn persist(&self) -> Result<()> {
        let token = self.token.lock().await;
        self.write(&token).await
    }

    async fn write(&self, token: &Token) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json =
            serde_json::to_string_pretty(token).map_err(|e| SpotifyError::Cache(e.to_string()))?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    pub async fn current_token(&self) -> Token {
        self.token.lock().await.clone()
    }

    pub fn is_expired(token: &Token, now: u64) -> bool {
        now + EXPIRY_MARGIN_SECS >= token.obtained_at + token.expires_in
    }

    async fn refresh_token(&self, current: &Token) -> Result<Token> {
        let res = self
            .http
            .post(&self.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", current.refresh_token.as_str()),
                ("client_id", self.client_id.as_str()),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SpotifyError::Auth(format!("token refresh failed: {e}")))?;

        let json: RefreshResponse = res
            .json()
            .await
            .map_err(|e| SpotifyError::Auth(format!("malformed token response: {e}")))?;

        Ok(Token {
            access_token: json.access_token,
            // the accounts service does not always rotate the refresh token
            refresh_token: json
                .refresh_token
                .unwrap_or_else(|| current.refresh_token.clone()),
            scope: json.scope.unwrap_or_else(|| current.scope.clone()),
            expires_in: json.expires_in.unwrap_or(3600),
            obtained_at: Utc::now().timestamp() as u64,
        })
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }
}

fn refresh_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            warn!("Cannot build token client with timeout: {}", e);
            Client::default()
        })
}

#[async_trait]
impl TokenGate for TokenManager {
    async fn valid_token(&self) -> Result<String> {
        // held across the refresh so concurrent callers wait for one refresh
        let mut token = self.token.lock().await;
        let now = Utc::now().timestamp() as u64;

        if Self::is_expired(&token, now) {
            debug!("access token expired, refreshing");
            let fresh = self.refresh_token(&token).await?;
            *token = fresh;
            if let Err(e) = self.write(&token).await {
                warn!("Failed to persist refreshed token: {}", e);
            }
        }

        Ok(token.access_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn token(obtained_at: u64, expires_in: u64) -> Token {
        Token {
            access_token: "old-access".to_string(),
            refresh_token: "refresh-1".to_string(),
            scope: "user-read-private".to_string(),
            expires_in,
            obtained_at,
        }
    }

    #[test]
    fn expiry_includes_safety_margin() {
        let t = token(1_000, 3_600);
        assert!(!TokenManager::is_expired(&t, 1_000));
        assert!(!TokenManager::is_expired(&t, 4_359));
        assert!(TokenManager::is_expired(&t, 4_360));
        assert!(TokenManager::is_expired(&t, 10_000));
    }

    #[tokio::test]
    async fn fresh_token_is_returned_without_refresh() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let now = Utc::now().timestamp() as u64;
        let manager = TokenManager::new(token(now, 3_600), server.uri(), "client".to_string())
            .with_path(dir.path().join("token.json"));

        assert_eq!(manager.valid_token().await.unwrap(), "old-access");
    }

    #[tokio::test]
    async fn expired_token_is_refreshed_once_and_persisted() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=refresh-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "new-access",
                "token_type": "Bearer",
                "expires_in": 3600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join("cache/token.json");
        let manager = Arc::new(
            TokenManager::new(
                token(0, 3_600),
                format!("{}/api/token", server.uri()),
                "client".to_string(),
            )
            .with_path(token_path.clone()),
        );

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let manager = Arc::clone(&manager);
                tokio::spawn(async move { manager.valid_token().await })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "new-access");
        }

        let current = manager.current_token().await;
        assert_eq!(current.refresh_token, "refresh-1");

        let reloaded = TokenManager::load_from(token_path, server.uri(), "client".to_string())
            .await
            .unwrap();
        assert_eq!(reloaded.current_token().await.access_token, "new-access");
    }

    #[tokio::test]
    async fn failed_refresh_is_an_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let manager = TokenManager::new(token(0, 3_600), server.uri(), "client".to_string())
            .with_path(dir.path().join("token.json"));

        let err = manager.valid_token().await.unwrap_err();
        assert!(matches!(err, SpotifyError::Auth(_)));
    }

    #[tokio::test]
    async fn hanging_refresh_gives_up_after_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_secs(10))
                    .set_body_json(serde_json::json!({
                        "access_token": "too-late",
                        "expires_in": 3600
                    })),
            )
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let manager = TokenManager::new(token(0, 3_600), server.uri(), "client".to_string())
            .with_path(dir.path().join("token.json"))
            .with_timeout(Duration::from_millis(200));

        let started = std::time::Instant::now();
        let err = manager.valid_token().await.unwrap_err();
        assert!(matches!(err, SpotifyError::Auth(_)));
        assert!(started.elapsed() < Duration::from_secs(5));

        // the lock is released again, so the next caller is not stuck either
        let err = manager.valid_token().await.unwrap_err();
        assert!(matches!(err, SpotifyError::Auth(_)));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
