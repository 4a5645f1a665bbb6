use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

use crate::types::{
    Album, AlbumTableRow, Artist, AudioTrack, Category, CategoryTableRow, Playlist,
    PlaylistTableRow, SearchResult, SearchTableRow, TrackTableRow,
};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

pub fn artist_names(artists: &[Artist]) -> String {
    artists
        .iter()
        .map(|a| a.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Formats milliseconds as `m:ss`.
pub fn format_duration(duration_ms: u64) -> String {
    let total_secs = duration_ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

pub fn album_row(album: &Album) -> AlbumTableRow {
    AlbumTableRow {
        id: album.id.clone(),
        name: album.name.clone(),
        artists: artist_names(&album.artists),
        released: album.release_date.clone().unwrap_or_default(),
    }
}

pub fn track_row(track: &AudioTrack) -> TrackTableRow {
    TrackTableRow {
        name: track.name.clone(),
        artists: artist_names(&track.artists),
        duration: format_duration(track.duration_ms),
        uri: track.uri.clone(),
    }
}

pub fn playlist_row(playlist: &Playlist) -> PlaylistTableRow {
    PlaylistTableRow {
        id: playlist.id.clone(),
        name: playlist.name.clone(),
        owner: playlist
            .owner
            .display_name
            .clone()
            .unwrap_or_else(|| playlist.owner.id.clone()),
    }
}

pub fn category_row(category: &Category) -> CategoryTableRow {
    CategoryTableRow {
        id: category.id.clone(),
        name: category.name.clone(),
    }
}

pub fn search_row(result: &SearchResult) -> SearchTableRow {
    let name = match result {
        SearchResult::Track(t) => format!("{} - {}", t.name, artist_names(&t.artists)),
        SearchResult::Album(a) => format!("{} - {}", a.name, artist_names(&a.artists)),
        other => other.name().to_string(),
    };

    SearchTableRow {
        kind: result.kind().to_string(),
        id: result.id().to_string(),
        name,
    }
}
