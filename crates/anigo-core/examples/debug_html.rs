//! Debug script to inspect the HTML structure of an AniGo page
//!
//! Run with: cargo run --example debug_html -p anigo-core -- /home?page=1

use anigo_core::{AnigoClient, PageFetcher, parse_catalog_page};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let target = std::env::args().nth(1).unwrap_or_else(|| "/home?page=1".to_string());
    let client = AnigoClient::new()?;

    println!("Fetching {}...\n", target);
    let html = client.fetch_page(&target).await?;

    std::fs::write("debug_page.html", &html)?;
    println!("HTML saved to debug_page.html");

    let page = parse_catalog_page(&html)?;
    println!("{} catalog entries, next page: {}", page.entries.len(), page.has_next_page);

    if let Some(start) = html.find("film_list-wrap") {
        let snippet: String = html[start..].chars().take(3000).collect();
        println!("\n=== HTML snippet (from film_list-wrap) ===\n");
        println!("{}", snippet);
    }

    Ok(())
}
