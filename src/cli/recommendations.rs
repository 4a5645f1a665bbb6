use tabled::Table;

use crate::{SpotifyError, error, utils};

pub async fn genres() {
    let client = super::client().await;
    match client.genres().await {
        Ok(genres) => {
            for genre in genres.genres {
                println!("{}", genre);
            }
        }
        Err(e) => super::fail("fetch genre seeds", e),
    }
}

pub async fn recommendations(limit: u32) {
    let client = super::client().await;
    let pb = super::spinner("Picking genres and fetching recommendations...");
    let result = client.recommendations(limit).await;
    pb.finish_and_clear();

    match result {
        Ok(recommendation) => {
            let rows: Vec<_> = recommendation.tracks.iter().map(utils::track_row).collect();
            println!("{}", Table::new(rows));
        }
        Err(e @ SpotifyError::NotEnoughGenres { .. }) => {
            error!("The genre catalog is too small to seed recommendations: {}", e)
        }
        Err(e) => super::fail("fetch recommendations", e),
    }
}
