use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    config, error, info,
    management::TokenManager,
    spotify,
    success,
    types::PkceToken,
    warning,
};

/// Signs in, persists the token, then caches the user's profile.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) {
    let token = match spotify::auth::auth(shared_state).await {
        Ok(t) => t,
        Err(e) => error!("Authentication failed. Err: {}", e),
    };

    let (token_url, client_id) = match (config::spotify_apitoken_url(), config::spotify_client_id()) {
        (Ok(url), Ok(id)) => (url, id),
        (Err(e), _) | (_, Err(e)) => error!("Incomplete configuration. Err: {}", e),
    };

    let token_mgr = TokenManager::new(token, token_url, client_id);
    if let Err(e) = token_mgr.persist().await {
        error!("Failed to save token to cache: {}", e);
    }
    success!("Authentication successful!");

    info!("Caching user profile...");
    let client = super::client().await;
    match client.refresh_cached_profile().await {
        Ok(profile) => success!(
            "Signed in as {}",
            profile.display_name.unwrap_or(profile.id)
        ),
        Err(e) => warning!("Failed to cache user profile, run spotifly me later: {}", e),
    }
}
