use super::SpotifyClient;
use crate::{
    error::Result,
    types::{
        CategoriesResponse, CategoryPlaylistsResponse, FeaturedPlaylistsResponse,
        NewReleasesResponse,
    },
};

impl SpotifyClient {
    /// `GET /browse/new-releases?limit=N`
    pub async fn new_releases(&self, limit: u32) -> Result<NewReleasesResponse> {
        self.get("/browse/new-releases", &[("limit", limit.to_string())])
            .await
    }

    /// `GET /browse/featured-playlists?limit=N`
    pub async fn featured_playlists(&self, limit: u32) -> Result<FeaturedPlaylistsResponse> {
        self.get("/browse/featured-playlists", &[("limit", limit.to_string())])
            .await
    }

    /// `GET /browse/categories`
    pub async fn categories(&self) -> Result<CategoriesResponse> {
        self.get("/browse/categories", &[]).await
    }

    /// `GET /browse/categories/{id}/playlists`
    pub async fn category_playlists(&self, category_id: &str) -> Result<CategoryPlaylistsResponse> {
        let endpoint = format!("/browse/categories/{category_id}/playlists");
        self.get(&endpoint, &[]).await
    }
}
