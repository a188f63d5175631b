//! Debug script walking search -> episodes -> video resolution
//!
//! Run with: RUST_LOG=anigo_core=debug cargo run --example debug_resolve -p anigo-core -- frieren

use anigo_core::{AnigoScraper, PreferredQuality};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let query = std::env::args().nth(1).unwrap_or_else(|| "frieren".to_string());
    let scraper = AnigoScraper::new()?;

    println!("Searching for '{}'...\n", query);
    let results = scraper.search(&query, 1).await?;

    if results.entries.is_empty() {
        println!("No results found!");
        return Ok(());
    }

    for (i, show) in results.entries.iter().take(3).enumerate() {
        println!("{}. {}", i + 1, show.title);
        println!("   URL: {}", show.url);
        if let Some(ref thumb) = show.thumbnail_url {
            println!("   Thumbnail: {}", thumb);
        }
    }

    let show = &results.entries[0];
    let detail = scraper.fetch_detail(&show.url).await?;
    println!("\n{} [{:?}]", detail.title, detail.status);
    println!("Genres: {}", detail.genre_line());

    let episodes = scraper.list_episodes(&show.url).await?;
    println!("{} episodes", episodes.len());

    let Some(episode) = episodes.first() else {
        return Ok(());
    };

    println!("\nResolving {} ({})...", episode.name, episode.url);
    let videos = scraper.resolve_videos(&episode.url).await?;
    if videos.is_empty() {
        println!("No playable sources found");
        return Ok(());
    }

    for video in scraper.sort(videos, PreferredQuality::default()) {
        println!("  {} -> {}", video.quality, video.url);
    }

    Ok(())
}
