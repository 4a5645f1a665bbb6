use crate::{success, warning};

/// Shows the signed-in profile and refreshes the cached copy.
pub async fn me() {
    let client = super::client().await;
    let pb = super::spinner("Fetching profile...");
    let result = client.refresh_cached_profile().await;
    pb.finish_and_clear();

    match result {
        Ok(profile) => {
            success!(
                "{} ({})",
                profile.display_name.as_deref().unwrap_or("<no display name>"),
                profile.id
            );
            if let Some(product) = profile.product {
                println!("  plan:      {}", product);
            }
            if let Some(country) = profile.country {
                println!("  country:   {}", country);
            }
            if let Some(followers) = profile.followers {
                println!("  followers: {}", followers.total);
            }
            if let Some(url) = profile.external_urls.get("spotify") {
                println!("  profile:   {}", url);
            }
        }
        Err(e) => {
            warning!("Could not refresh profile.");
            super::fail("fetch profile", e)
        }
    }
}
