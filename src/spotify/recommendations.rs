use std::collections::HashSet;

use rand::{Rng, seq::IndexedRandom};
use tracing::debug;

use super::SpotifyClient;
use crate::{
    error::{Result, SpotifyError},
    types::{Genres, RecommendationResponse},
};

/// Number of seed genres sent with every recommendation request.
pub const SEED_GENRE_COUNT: usize = 5;

/// Draws `count` distinct genres uniformly at random from `genres`.
///
/// Genres are drawn with replacement and duplicates rejected until `count`
/// distinct ones are collected, in draw order. Duplicate entries in the
/// catalog do not count as distinct.
///
/// # Errors
///
/// [`SpotifyError::NotEnoughGenres`] if the catalog holds fewer than `count`
/// distinct genres, since the draw could never finish.
pub fn sample_genre_seeds<R: Rng + ?Sized>(
    genres: &[String],
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>> {
    let available = genres.iter().collect::<HashSet<_>>().len();
    if available < count {
        return Err(SpotifyError::NotEnoughGenres {
            available,
            required: count,
        });
    }

    let mut seeds: Vec<String> = Vec::with_capacity(count);
    while seeds.len() < count {
        if let Some(genre) = genres.choose(rng) {
            if !seeds.contains(genre) {
                seeds.push(genre.clone());
            }
        }
    }

    Ok(seeds)
}

impl SpotifyClient {
    /// `GET /recommendations/available-genre-seeds`
    pub async fn genres(&self) -> Result<Genres> {
        self.get("/recommendations/available-genre-seeds", &[])
            .await
    }

    /// Recommends `limit` tracks seeded by five random genres.
    ///
    /// Two requests: the genre catalog first, then `/recommendations` with
    /// the sampled seeds. Either failing fails the whole operation; nothing is
    /// retried.
    pub async fn recommendations(&self, limit: u32) -> Result<RecommendationResponse> {
        let catalog = self.genres().await?;
        let seeds = {
            let mut rng = rand::rng();
            sample_genre_seeds(&catalog.genres, SEED_GENRE_COUNT, &mut rng)?
        };
        debug!("recommendation seeds: {:?}", seeds);

        self.get(
            "/recommendations",
            &[("limit", limit.to_string()), ("seed_genres", seeds.join(","))],
        )
        .await
    }
}
