//! # API Module
//!
//! HTTP endpoints of the short-lived local server that completes the OAuth
//! sign-in flow.
//!
//! - [`callback`] - receives the authorization code from Spotify's
//!   authorization server and exchanges it, together with the PKCE verifier
//!   kept in shared state, for an access token.
//! - [`health`] - reports that the server is up, with name and version.
//!
//! Both are plain async handlers wired into an axum router by
//! [`crate::server::router`].

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
