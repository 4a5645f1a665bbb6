use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

pub type ExternalUrls = HashMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Followers {
    pub total: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub country: Option<String>,
    pub product: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub followers: Option<Followers>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub uri: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    pub album_type: String,
    pub total_tracks: Option<u32>,
    pub release_date: Option<String>,
    pub uri: Option<String>,
    #[serde(default)]
    pub available_markets: Vec<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub images: Vec<Image>,
    pub artists: Vec<Artist>,
}

/// A playable track. `album` is absent when the track is nested inside an
/// album detail response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioTrack {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub album: Option<Album>,
    pub artists: Vec<Artist>,
    pub disc_number: u32,
    pub duration_ms: u64,
    pub explicit: bool,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub popularity: Option<u32>,
    pub preview_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistOwner {
    pub id: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub uri: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub images: Option<Vec<Image>>,
    pub owner: PlaylistOwner,
}

/// One page of a paged collection. Only the fixed `limit` is ever requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub total: Option<u32>,
    pub next: Option<String>,
    pub previous: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReleasesResponse {
    pub albums: Page<Album>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedPlaylistsResponse {
    pub message: Option<String>,
    pub playlists: Page<Playlist>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPlaylistsResponse {
    pub playlists: Page<Playlist>,
}

pub type UserPlaylistsResponse = Page<Playlist>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icons: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Page<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumDetailResponse {
    pub id: String,
    pub name: String,
    pub album_type: String,
    pub label: Option<String>,
    pub release_date: Option<String>,
    #[serde(default)]
    pub available_markets: Vec<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub images: Vec<Image>,
    pub artists: Vec<Artist>,
    pub tracks: Page<AudioTrack>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub added_at: Option<String>,
    pub track: AudioTrack,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistTracks {
    pub items: Vec<PlaylistItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistDetailResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    pub images: Option<Vec<Image>>,
    pub owner: PlaylistOwner,
    pub tracks: PlaylistTracks,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedAlbum {
    pub added_at: Option<String>,
    pub album: Album,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryAlbumsResponse {
    pub items: Vec<SavedAlbum>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genres {
    pub genres: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub tracks: Vec<AudioTrack>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQueryResponse {
    pub tracks: Page<AudioTrack>,
    pub playlists: Page<Playlist>,
    pub albums: Page<Album>,
    pub artists: Page<Artist>,
}

/// One entry of a merged search result list.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    Track(AudioTrack),
    Playlist(Playlist),
    Album(Album),
    Artist(Artist),
}

impl SearchResult {
    pub fn kind(&self) -> &'static str {
        match self {
            SearchResult::Track(_) => "track",
            SearchResult::Playlist(_) => "playlist",
            SearchResult::Album(_) => "album",
            SearchResult::Artist(_) => "artist",
        }
    }

    pub fn id(&self) -> &str {
        match self {
            SearchResult::Track(t) => &t.id,
            SearchResult::Playlist(p) => &p.id,
            SearchResult::Album(a) => &a.id,
            SearchResult::Artist(a) => &a.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SearchResult::Track(t) => &t.name,
            SearchResult::Playlist(p) => &p.name,
            SearchResult::Album(a) => &a.name,
            SearchResult::Artist(a) => &a.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackUri {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveTracksRequest {
    pub tracks: Vec<TrackUri>,
}

#[derive(Tabled)]
pub struct AlbumTableRow {
    pub id: String,
    pub name: String,
    pub artists: String,
    pub released: String,
}

#[derive(Tabled)]
pub struct TrackTableRow {
    pub name: String,
    pub artists: String,
    pub duration: String,
    pub uri: String,
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub id: String,
    pub name: String,
    pub owner: String,
}

#[derive(Tabled)]
pub struct CategoryTableRow {
    pub id: String,
    pub name: String,
}

#[derive(Tabled)]
pub struct SearchTableRow {
    pub kind: String,
    pub id: String,
    pub name: String,
}
