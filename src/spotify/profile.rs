use super::SpotifyClient;
use crate::{error::Result, types::UserProfile};

impl SpotifyClient {
    /// Fetches the signed-in user's profile (`GET /me`).
    pub async fn current_user_profile(&self) -> Result<UserProfile> {
        self.get("/me", &[]).await
    }

    /// Fetches the profile and stores it as the cached profile blob, which
    /// later supplies the user id for playlist operations.
    pub async fn refresh_cached_profile(&self) -> Result<UserProfile> {
        let profile = self.current_user_profile().await?;
        self.profiles.persist(&profile).await?;
        Ok(profile)
    }
}
