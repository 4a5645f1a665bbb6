//! On-disk state: the OAuth token behind the [`crate::spotify::TokenGate`]
//! and the cached user profile.

mod auth;
mod profile;

pub use auth::TokenManager;
pub use profile::ProfileManager;
