use std::sync::Arc;

use serde_json::json;
use spotifly::{
    SpotifyClient, SpotifyError,
    config::ClientConfig,
    management::ProfileManager,
    spotify::StaticToken,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path},
};

fn client_for(server: &MockServer, profiles: ProfileManager) -> SpotifyClient {
    SpotifyClient::new(
        ClientConfig::with_base_url(server.uri()),
        Arc::new(StaticToken("integration-token".to_string())),
        profiles,
    )
    .unwrap()
}

#[tokio::test]
async fn test_profile_then_create_playlist() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let profiles = ProfileManager::new(dir.path().join("user-profile.json"));
    let client = client_for(&server, profiles.clone());

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer integration-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "wizzler",
            "display_name": "Wizzler",
            "country": "SE",
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/users/wizzler/playlists"))
        .and(body_json(json!({ "name": "Late Night", "public": false })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "pl1",
            "name": "Late Night",
            "owner": { "id": "wizzler", "display_name": "Wizzler" },
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client.create_playlist("Late Night").await.unwrap_err();
    assert!(matches!(err, SpotifyError::Precondition(_)));

    let profile = client.refresh_cached_profile().await.unwrap();
    assert_eq!(profile.id, "wizzler");
    assert_eq!(profiles.load().await.unwrap().unwrap().id, "wizzler");

    let playlist = client.create_playlist("Late Night").await.unwrap();
    assert_eq!(playlist.id, "pl1");
    assert_eq!(playlist.owner.id, "wizzler");
}

#[tokio::test]
async fn test_search_flattens_categories() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let client = client_for(&server, ProfileManager::new(dir.path().join("p.json")));

    let empty = json!({ "items": [] });
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tracks": empty,
            "playlists": empty,
            "albums": empty,
            "artists": { "items": [{ "id": "ar1", "name": "Röyksopp", "type": "artist" }] },
        })))
        .mount(&server)
        .await;

    let results = client.search("röyksopp", 2).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].kind(), "artist");
    assert_eq!(results[0].name(), "Röyksopp");
}
