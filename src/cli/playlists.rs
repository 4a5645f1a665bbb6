use tabled::Table;

use crate::{info, success, utils};

pub async fn playlists(limit: u32) {
    let client = super::client().await;
    match client.current_user_playlists(limit).await {
        Ok(playlists) => {
            let rows: Vec<_> = playlists.items.iter().map(utils::playlist_row).collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => super::fail("list your playlists", e),
    }
}

pub async fn playlist(playlist_id: String) {
    let client = super::client().await;
    let pb = super::spinner("Fetching playlist...");
    let result = client.playlist_detail(&playlist_id).await;
    pb.finish_and_clear();

    match result {
        Ok(detail) => {
            info!(
                "{} by {}",
                detail.name,
                detail
                    .owner
                    .display_name
                    .as_deref()
                    .unwrap_or(detail.owner.id.as_str())
            );
            if let Some(description) = detail.description.as_deref().filter(|d| !d.is_empty()) {
                info!("{}", description);
            }
            let rows: Vec<_> = detail
                .tracks
                .items
                .iter()
                .map(|item| utils::track_row(&item.track))
                .collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => super::fail("fetch playlist", e),
    }
}

pub async fn playlist_tracks(playlist_id: String) {
    let client = super::client().await;
    match client.playlist_tracks(&playlist_id).await {
        Ok(tracks) => {
            let rows: Vec<_> = tracks
                .items
                .iter()
                .map(|item| utils::track_row(&item.track))
                .collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => super::fail("fetch playlist tracks", e),
    }
}

pub async fn create_playlist(name: String) {
    let client = super::client().await;
    match client.create_playlist(&name).await {
        Ok(playlist) => success!("Playlist {} created with id {}", playlist.name, playlist.id),
        Err(e) => super::fail("create playlist", e),
    }
}

pub async fn add_track(playlist_id: String, track_uri: String) {
    let client = super::client().await;
    match client.add_track_to_playlist(&playlist_id, &track_uri).await {
        Ok(_) => success!("Added {} to playlist {}", track_uri, playlist_id),
        Err(e) => super::fail("add track to playlist", e),
    }
}

pub async fn remove_track(playlist_id: String, track_uri: String) {
    let client = super::client().await;
    match client
        .remove_track_from_playlist(&playlist_id, &track_uri)
        .await
    {
        Ok(_) => success!("Removed {} from playlist {}", track_uri, playlist_id),
        Err(e) => super::fail("remove track from playlist", e),
    }
}
