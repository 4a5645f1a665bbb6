use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{
    api,
    error::{Result, SpotifyError},
    types::PkceToken,
};

pub fn router(state: Arc<Mutex<Option<PkceToken>>>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

/// Binds the callback address. A bad address or a taken port fails here,
/// before the user is sent to the browser.
pub async fn bind(addr: &str) -> Result<TcpListener> {
    let addr = SocketAddr::from_str(addr)
        .map_err(|e| SpotifyError::Config(format!("Failed to parse server address: {e}")))?;

    Ok(TcpListener::bind(&addr).await?)
}

pub async fn serve(listener: TcpListener, state: Arc<Mutex<Option<PkceToken>>>) -> Result<()> {
    axum::serve(listener, router(state)).await?;
    Ok(())
}
