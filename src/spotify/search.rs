use super::SpotifyClient;
use crate::{
    error::Result,
    types::{SearchQueryResponse, SearchResult},
};

/// Categories requested from `/search`.
const SEARCH_TYPES: &str = "album,playlist,track,artist";

/// Flattens the four result pages into one list: tracks, playlists, albums,
/// artists, each in the order the API returned them.
pub fn merge_search_results(response: SearchQueryResponse) -> Vec<SearchResult> {
    let SearchQueryResponse {
        tracks,
        playlists,
        albums,
        artists,
    } = response;

    let mut results = Vec::with_capacity(
        tracks.items.len() + playlists.items.len() + albums.items.len() + artists.items.len(),
    );
    results.extend(tracks.items.into_iter().map(SearchResult::Track));
    results.extend(playlists.items.into_iter().map(SearchResult::Playlist));
    results.extend(albums.items.into_iter().map(SearchResult::Album));
    results.extend(artists.items.into_iter().map(SearchResult::Artist));
    results
}

impl SpotifyClient {
    /// Searches tracks, playlists, albums and artists with one request
    /// (`GET /search?q=..&type=album,playlist,track,artist&limit=N`).
    ///
    /// `limit` applies per category. The query is URL-encoded, nothing else.
    pub async fn search(&self, query: &str, limit: u32) -> Result<Vec<SearchResult>> {
        let response: SearchQueryResponse = self
            .get(
                "/search",
                &[
                    ("q", query.to_string()),
                    ("type", SEARCH_TYPES.to_string()),
                    ("limit", limit.to_string()),
                ],
            )
            .await?;

        Ok(merge_search_results(response))
    }
}
