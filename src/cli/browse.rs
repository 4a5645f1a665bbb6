use tabled::Table;

use crate::{info, utils};

pub async fn new_releases(limit: u32) {
    let client = super::client().await;
    let pb = super::spinner("Fetching new releases...");
    let result = client.new_releases(limit).await;
    pb.finish_and_clear();

    match result {
        Ok(releases) => {
            let rows: Vec<_> = releases.albums.items.iter().map(utils::album_row).collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => super::fail("fetch new releases", e),
    }
}

pub async fn featured_playlists(limit: u32) {
    let client = super::client().await;
    let pb = super::spinner("Fetching featured playlists...");
    let result = client.featured_playlists(limit).await;
    pb.finish_and_clear();

    match result {
        Ok(featured) => {
            if let Some(message) = featured.message {
                info!("{}", message);
            }
            let rows: Vec<_> = featured
                .playlists
                .items
                .iter()
                .map(utils::playlist_row)
                .collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => super::fail("fetch featured playlists", e),
    }
}

pub async fn categories() {
    let client = super::client().await;
    match client.categories().await {
        Ok(categories) => {
            let rows: Vec<_> = categories
                .categories
                .items
                .iter()
                .map(utils::category_row)
                .collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => super::fail("fetch categories", e),
    }
}

pub async fn category_playlists(category_id: String) {
    let client = super::client().await;
    match client.category_playlists(&category_id).await {
        Ok(playlists) => {
            let rows: Vec<_> = playlists
                .playlists
                .items
                .iter()
                .map(utils::playlist_row)
                .collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => super::fail("fetch category playlists", e),
    }
}
