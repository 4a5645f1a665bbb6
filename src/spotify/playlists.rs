use reqwest::Method;
use tracing::info;

use super::SpotifyClient;
use crate::{
    error::Result,
    types::{
        AddTracksRequest, CreatePlaylistRequest, Playlist, PlaylistDetailResponse, PlaylistTracks,
        RemoveTracksRequest, SnapshotResponse, TrackUri, UserPlaylistsResponse,
    },
};

impl SpotifyClient {
    /// `GET /playlists/{id}`
    pub async fn playlist_detail(&self, playlist_id: &str) -> Result<PlaylistDetailResponse> {
        let endpoint = format!("/playlists/{playlist_id}");
        self.get(&endpoint, &[]).await
    }

    /// `GET /playlists/{id}/tracks`
    pub async fn playlist_tracks(&self, playlist_id: &str) -> Result<PlaylistTracks> {
        let endpoint = format!("/playlists/{playlist_id}/tracks");
        self.get(&endpoint, &[]).await
    }

    /// Playlists of the cached user (`GET /users/{userId}/playlists?limit=N`).
    ///
    /// Fails with a precondition error, without sending anything, when no
    /// profile has been cached yet.
    pub async fn current_user_playlists(&self, limit: u32) -> Result<UserPlaylistsResponse> {
        let user_id = self.cached_user_id().await?;
        let endpoint = format!("/users/{user_id}/playlists");
        self.get(&endpoint, &[("limit", limit.to_string())]).await
    }

    /// Creates a private playlist for the cached user.
    ///
    /// Same precondition as [`SpotifyClient::current_user_playlists`].
    pub async fn create_playlist(&self, name: &str) -> Result<Playlist> {
        let user_id = self.cached_user_id().await?;
        let endpoint = format!("/users/{user_id}/playlists");
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            public: false,
        };

        let playlist: Playlist = self.send_json(Method::POST, &endpoint, &body).await?;
        info!("Created playlist {} ({})", playlist.name, playlist.id);
        Ok(playlist)
    }

    /// `POST /playlists/{id}/tracks` with `{"uris": [uri]}`.
    pub async fn add_track_to_playlist(
        &self,
        playlist_id: &str,
        track_uri: &str,
    ) -> Result<SnapshotResponse> {
        let endpoint = format!("/playlists/{playlist_id}/tracks");
        let body = AddTracksRequest {
            uris: vec![track_uri.to_string()],
        };
        self.send_json(Method::POST, &endpoint, &body).await
    }

    /// `DELETE /playlists/{id}/tracks` with `{"tracks": [{"uri": uri}]}`.
    pub async fn remove_track_from_playlist(
        &self,
        playlist_id: &str,
        track_uri: &str,
    ) -> Result<SnapshotResponse> {
        let endpoint = format!("/playlists/{playlist_id}/tracks");
        let body = RemoveTracksRequest {
            tracks: vec![TrackUri {
                uri: track_uri.to_string(),
            }],
        };
        self.send_json(Method::DELETE, &endpoint, &body).await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    use crate::{error::SpotifyError, spotify::testing::Harness};

    fn track_json(id: &str) -> serde_json::Value {
        serde_json::json!({
            "album": { "album_type": "album", "id": "al1", "name": "Record", "artists": [{ "id": "ar1", "name": "Band" }] },
            "artists": [{ "id": "ar1", "name": "Band" }],
            "disc_number": 1,
            "duration_ms": 200000,
            "explicit": false,
            "external_urls": {},
            "id": id,
            "name": format!("Track {id}"),
            "popularity": 40,
            "preview_url": null,
            "uri": format!("spotify:track:{id}")
        })
    }

    fn playlist_json(id: &str, name: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": name,
            "description": "",
            "external_urls": {},
            "images": [],
            "owner": { "id": "wizzler", "display_name": "Wizzler" },
            "public": false,
            "uri": format!("spotify:playlist:{id}")
        })
    }

    #[tokio::test]
    async fn playlist_detail_keeps_track_order() {
        let h = Harness::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": "p1",
                "name": "Road Trip",
                "description": null,
                "external_urls": {},
                "images": [],
                "owner": { "id": "wizzler", "display_name": null },
                "tracks": {
                    "items": [
                        { "added_at": "2024-01-01T00:00:00Z", "track": track_json("t3") },
                        { "added_at": "2024-01-02T00:00:00Z", "track": track_json("t1") },
                        { "added_at": null, "track": track_json("t2") }
                    ]
                }
            })))
            .mount(&h.server)
            .await;

        let detail = h.client.playlist_detail("p1").await.unwrap();
        let ids: Vec<_> = detail.tracks.items.iter().map(|i| i.track.id.as_str()).collect();
        assert_eq!(ids, vec!["t3", "t1", "t2"]);
    }

    #[tokio::test]
    async fn playlist_tracks_decode() {
        let h = Harness::start().await;
        Mock::given(method("GET"))
            .and(path("/playlists/p1/tracks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [{ "track": track_json("t1") }],
                "total": 1
            })))
            .mount(&h.server)
            .await;

        let tracks = h.client.playlist_tracks("p1").await.unwrap();
        assert_eq!(tracks.items[0].track.uri, "spotify:track:t1");
        assert_eq!(tracks.items[0].added_at, None);
    }

    #[tokio::test]
    async fn user_playlists_need_cached_profile() {
        let h = Harness::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&h.server)
            .await;

        let err = h.client.current_user_playlists(5).await.unwrap_err();
        assert!(matches!(err, SpotifyError::Precondition(_)));
        assert_eq!(h.token_calls(), 0);
    }

    #[tokio::test]
    async fn create_playlist_needs_cached_profile() {
        let h = Harness::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&h.server)
            .await;

        let err = h.client.create_playlist("Mix").await.unwrap_err();
        assert!(matches!(err, SpotifyError::Precondition(_)));
    }

    #[tokio::test]
    async fn user_playlists_use_cached_user_id() {
        let h = Harness::with_cached_user("wizzler").await;
        Mock::given(method("GET"))
            .and(path("/users/wizzler/playlists"))
            .and(query_param("limit", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "items": [playlist_json("p1", "One"), playlist_json("p2", "Two")],
                "limit": 5,
                "total": 2
            })))
            .expect(1)
            .mount(&h.server)
            .await;

        let playlists = h.client.current_user_playlists(5).await.unwrap();
        assert_eq!(playlists.items.len(), 2);
        assert_eq!(playlists.items[1].name, "Two");
    }

    #[tokio::test]
    async fn create_playlist_posts_private_playlist() {
        let h = Harness::with_cached_user("wizzler").await;
        Mock::given(method("POST"))
            .and(path("/users/wizzler/playlists"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({ "name": "Late Night", "public": false })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(playlist_json("new1", "Late Night")),
            )
            .expect(1)
            .mount(&h.server)
            .await;

        let playlist = h.client.create_playlist("Late Night").await.unwrap();
        assert_eq!(playlist.id, "new1");
    }

    #[tokio::test]
    async fn add_track_posts_uri_list() {
        let h = Harness::start().await;
        Mock::given(method("POST"))
            .and(path("/playlists/p1/tracks"))
            .and(header("Authorization", "Bearer test-token"))
            .and(body_json(serde_json::json!({ "uris": ["spotify:track:t1"] })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(serde_json::json!({ "snapshot_id": "s2" })),
            )
            .expect(1)
            .mount(&h.server)
            .await;

        let snapshot = h
            .client
            .add_track_to_playlist("p1", "spotify:track:t1")
            .await
            .unwrap();
        assert_eq!(snapshot.snapshot_id, "s2");
    }

    #[tokio::test]
    async fn add_track_transport_error_is_failure() {
        let h = Harness::start().await;
        Mock::given(method("POST"))
            .and(path("/playlists/p1/tracks"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&h.server)
            .await;

        let result = h.client.add_track_to_playlist("p1", "spotify:track:t1").await;
        assert!(result.is_err_and(|e| e.is_transport()));
    }

    #[tokio::test]
    async fn remove_track_sends_track_objects() {
        let h = Harness::start().await;
        Mock::given(method("DELETE"))
            .and(path("/playlists/p1/tracks"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(serde_json::json!({
                "tracks": [{ "uri": "spotify:track:t1" }]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "snapshot_id": "s3" })),
            )
            .expect(1)
            .mount(&h.server)
            .await;

        let snapshot = h
            .client
            .remove_track_from_playlist("p1", "spotify:track:t1")
            .await
            .unwrap();
        assert_eq!(snapshot.snapshot_id, "s3");
    }
}
