use reqwest::Method;

use super::SpotifyClient;
use crate::{
    error::Result,
    types::{AlbumDetailResponse, LibraryAlbumsResponse},
};

impl SpotifyClient {
    /// `GET /albums/{id}`
    pub async fn album_detail(&self, album_id: &str) -> Result<AlbumDetailResponse> {
        let endpoint = format!("/albums/{album_id}");
        self.get(&endpoint, &[]).await
    }

    /// The user's saved albums (`GET /me/albums?limit=N`).
    pub async fn saved_albums(&self, limit: u32) -> Result<LibraryAlbumsResponse> {
        self.get("/me/albums", &[("limit", limit.to_string())])
            .await
    }

    /// Saves an album to the user's library (`PUT /me/albums?ids={id}`).
    ///
    /// Succeeds only when the exchange completes with a success status; the
    /// response body is ignored.
    pub async fn save_album(&self, album_id: &str) -> Result<()> {
        self.send_empty(Method::PUT, "/me/albums", &[("ids", album_id.to_string())])
            .await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    use crate::{error::SpotifyError, spotify::testing::Harness};

    fn album_detail_json() -> serde_json::Value {
        serde_json::json!({
            "album_type": "album",
            "artists": [{ "id": "ar1", "name": "The Band", "type": "artist", "uri": "spotify:artist:ar1", "external_urls": {} }],
            "available_markets": ["US"],
            "external_urls": { "spotify": "https://open.spotify.com/album/al1" },
            "id": "al1",
            "images": [],
            "label": "Indie Label",
            "name": "First Record",
            "release_date": "1999-01-01",
            "tracks": {
                "items": [
                    {
                        "artists": [{ "id": "ar1", "name": "The Band" }],
                        "disc_number": 1,
                        "duration_ms": 180000,
                        "explicit": false,
                        "external_urls": {},
                        "id": "t1",
                        "name": "Opener",
                        "preview_url": null,
                        "uri": "spotify:track:t1"
                    },
                    {
                        "artists": [{ "id": "ar1", "name": "The Band" }],
                        "disc_number": 1,
                        "duration_ms": 240000,
                        "explicit": true,
                        "external_urls": {},
                        "id": "t2",
                        "name": "Closer",
                        "preview_url": null,
                        "uri": "spotify:track:t2"
                    }
                ],
                "total": 2
            }
        })
    }

    #[tokio::test]
    async fn album_detail_tracks_have_no_album() {
        let h = Harness::start().await;
        Mock::given(method("GET"))
            .and(path("/albums/al1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(album_detail_json()))
            .expect(1)
            .mount(&h.server)
            .await;

        let album = h.client.album_detail("al1").await.unwrap();
        assert_eq!(album.label.as_deref(), Some("Indie Label"));
        let names: Vec<_> = album.tracks.items.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Opener", "Closer"]);
        assert!(album.tracks.items.iter().all(|t| t.album.is_none()));
    }

    #[tokio::test]
    async fn saved_albums_decode() {
        let h = Harness::start().await;
        Mock::given(method("GET"))
            .and(path("/me/albums"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{
                    "added_at": "2024-01-05T10:00:00Z",
                    "album": {
                        "album_type": "compilation",
                        "id": "c1",
                        "name": "Hits",
                        "artists": [{ "id": "va", "name": "Various Artists" }]
                    }
                }],
                "limit": 5,
                "total": 1
            })))
            .mount(&h.server)
            .await;

        let library = h.client.saved_albums(5).await.unwrap();
        assert_eq!(library.items.len(), 1);
        assert_eq!(library.items[0].album.album_type, "compilation");
    }

    #[tokio::test]
    async fn save_album_puts_id_with_json_content_type() {
        let h = Harness::start().await;
        Mock::given(method("PUT"))
            .and(path("/me/albums"))
            .and(query_param("ids", "al1"))
            .and(header("Authorization", "Bearer test-token"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&h.server)
            .await;

        h.client.save_album("al1").await.unwrap();
    }

    #[tokio::test]
    async fn save_album_reports_error_status() {
        let h = Harness::start().await;
        Mock::given(method("PUT"))
            .and(path("/me/albums"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&h.server)
            .await;

        let err = h.client.save_album("al1").await.unwrap_err();
        assert!(matches!(err, SpotifyError::Status { .. }));
    }
}
