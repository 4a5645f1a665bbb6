use tabled::Table;

use crate::{utils, warning};

pub async fn search(query: String, limit: u32) {
    let client = super::client().await;
    let pb = super::spinner("Searching...");
    let result = client.search(&query, limit).await;
    pb.finish_and_clear();

    match result {
        Ok(results) if results.is_empty() => warning!("Nothing found for \"{}\"", query),
        Ok(results) => {
            let rows: Vec<_> = results.iter().map(utils::search_row).collect();
            println!("{}", Table::new(rows));
        }
        Err(e) => super::fail("search", e),
    }
}
