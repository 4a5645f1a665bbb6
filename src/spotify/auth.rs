use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    config,
    error::{Result, SpotifyError},
    server,
    types::{PkceToken, Token},
    utils, warning,
};

/// How long the sign-in flow waits for the browser callback.
const CALLBACK_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    scope: Option<String>,
    expires_in: u64,
}

/// Runs the OAuth 2.0 PKCE authorization flow and returns the obtained token.
///
/// 1. **PKCE Setup**: generates a code verifier and its SHA256 challenge
/// 2. **Server Start**: launches the local callback server
/// 3. **Browser Launch**: opens the authorization URL (or prints it)
/// 4. **Callback Handling**: the server exchanges the code for a token
/// 5. **Wait**: polls the shared state for up to 60 seconds
///
/// Persisting the token is left to the caller.
///
/// # Errors
///
/// - [`SpotifyError::Config`] when the auth settings are incomplete
/// - [`SpotifyError::Auth`] when no token arrived before the timeout
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Result<Token> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    let auth_url = authorization_url(
        &config::spotify_apiauth_url()?,
        &config::spotify_client_id()?,
        &config::spotify_redirect_uri()?,
        &code_challenge,
        &config::spotify_scope()?,
    )?;
    let server_addr = config::server_addr()?;

    // Store verifier in shared state before redirect
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier,
            token: None,
        });
    }

    run_flow(shared_state, &auth_url, &server_addr, CALLBACK_TIMEOUT).await
}

/// Serves the callback, sends the user to `auth_url` and waits for the token.
///
/// Fails right away when the callback address cannot be bound, and as soon
/// as the callback server stops on its own.
pub(crate) async fn run_flow(
    shared_state: Arc<Mutex<Option<PkceToken>>>,
    auth_url: &Url,
    server_addr: &str,
    max_wait: Duration,
) -> Result<Token> {
    let listener = server::bind(server_addr).await?;
    let server_state = Arc::clone(&shared_state);
    let mut server = tokio::spawn(server::serve(listener, server_state));

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = tokio::select! {
        token = wait_for_token(shared_state, max_wait) => token,
        served = &mut server => {
            return match served {
                Ok(Err(e)) => Err(e),
                _ => Err(SpotifyError::Auth("callback server stopped unexpectedly".to_string())),
            };
        }
    };
    server.abort();

    token.ok_or_else(|| SpotifyError::Auth("authentication failed or timed out".to_string()))
}

/// Builds the authorization URL the user is sent to.
pub fn authorization_url(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    code_challenge: &str,
    scope: &str,
) -> Result<Url> {
    Url::parse_with_params(
        auth_url,
        &[
            ("client_id", client_id),
            ("response_type", "code"),
            ("redirect_uri", redirect_uri),
            ("code_challenge", code_challenge),
            ("code_challenge_method", "S256"),
            ("scope", scope),
        ],
    )
    .map_err(|e| SpotifyError::Config(format!("invalid authorization url {auth_url}: {e}")))
}

/// Polls the shared state once per second until the callback stored a token.
async fn wait_for_token(
    shared_state: Arc<Mutex<Option<PkceToken>>>,
    max_wait: Duration,
) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code plus the PKCE verifier for a token.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token> {
    let token_url = config::spotify_apitoken_url()?;
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri()?;

    exchange_code(
        &token_url,
        &client_id,
        &redirect_uri,
        code,
        verifier,
        config::spotify_timeout(),
    )
    .await
}

pub(crate) async fn exchange_code(
    token_url: &str,
    client_id: &str,
    redirect_uri: &str,
    code: &str,
    verifier: &str,
    timeout: Duration,
) -> Result<Token> {
    debug!("exchanging authorization code at {}", token_url);
    let http = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| SpotifyError::Config(format!("Failed to build HTTP client: {e}")))?;

    let res = http
        .post(token_url)
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri),
        ])
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| SpotifyError::Auth(format!("code exchange failed: {e}")))?;

    let json: TokenResponse = res
        .json()
        .await
        .map_err(|e| SpotifyError::Auth(format!("malformed token response: {e}")))?;

    Ok(Token {
        access_token: json.access_token,
        refresh_token: json.refresh_token,
        scope: json.scope.unwrap_or_default(),
        expires_in: json.expires_in,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
