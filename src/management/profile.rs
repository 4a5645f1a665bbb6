use std::{io::ErrorKind, path::PathBuf};

use crate::{
    config,
    error::{Result, SpotifyError},
    types::UserProfile,
};

/// The single cached user profile blob.
#[derive(Debug, Clone)]
pub struct ProfileManager {
    path: PathBuf,
}

impl ProfileManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_location() -> Self {
        Self::new(config::data_dir().join("cache/user-profile.json"))
    }

    /// Returns `None` when nothing has been cached yet.
    pub async fn load(&self) -> Result<Option<UserProfile>> {
        let content = match async_fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let profile =
            serde_json::from_str(&content).map_err(|e| SpotifyError::Cache(e.to_string()))?;
        Ok(Some(profile))
    }

    pub async fn persist(&self, profile: &UserProfile) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(profile)
            .map_err(|e| SpotifyError::Cache(e.to_string()))?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        match async_fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
