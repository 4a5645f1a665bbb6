use tabled::Table;

use crate::{info, success, utils};

pub async fn album(album_id: String) {
    let client = super::client().await;
    let pb = super::spinner("Fetching album...");
    let result = client.album_detail(&album_id).await;
    pb.finish_and_clear();

    match result {
        Ok(album) => {
            info!(
                "{} by {} ({})",
                album.name,
                utils::artist_names(&album.artists),
                album.release_date.as_deref().unwrap_or("unknown date")
            );
            if let Some(label) = &album.label {
                info!("Label: {}", label);
            }
            let rows: Vec<_> = album.tracks.items.iter().map(utils::track_row).collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => super::fail("fetch album", e),
    }
}

pub async fn saved_albums(limit: u32) {
    let client = super::client().await;
    match client.saved_albums(limit).await {
        Ok(library) => {
            let rows: Vec<_> = library
                .items
                .iter()
                .map(|saved| utils::album_row(&saved.album))
                .collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => super::fail("fetch saved albums", e),
    }
}

pub async fn save_album(album_id: String) {
    let client = super::client().await;
    match client.save_album(&album_id).await {
        Ok(()) => success!("Album {} saved to your library", album_id),
        Err(e) => super::fail("save album", e),
    }
}
