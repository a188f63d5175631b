//! AniGo Source Adapter Core Library
//!
//! Provides an async API for browsing the AniGo anime catalog and resolving
//! playable streams for its episodes.
//!
//! # Overview
//!
//! This crate provides:
//! - Rate-limited HTTP client behind the [`PageFetcher`] trait
//! - HTML parsers for listing, detail, episode, server and source pages
//! - A multi-server [`VideoResolver`] that skips failing servers
//! - Preferred-quality ranking of the resolved streams
//! - The [`AnimeSource`] trait, implemented by [`AnigoScraper`]
//!
//! # Example
//!
//! ```no_run
//! use anigo_core::{AnigoScraper, PreferredQuality, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let scraper = AnigoScraper::new()?;
//!
//!     let results = scraper.search("frieren", 1).await?;
//!     let Some(show) = results.entries.first() else {
//!         return Ok(());
//!     };
//!
//!     let episodes = scraper.list_episodes(&show.url).await?;
//!     if let Some(episode) = episodes.first() {
//!         let videos = scraper.resolve_videos(&episode.url).await?;
//!         for video in scraper.sort(videos, PreferredQuality::default()) {
//!             println!("{}: {}", video.quality, video.url);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Failure model
//!
//! Listing entries that cannot be parsed are dropped. Servers whose sources
//! cannot be fetched are reported to the resolver's [`ServerFailureHook`] and
//! skipped. Only a failure to fetch the top-level page becomes an error.

mod client;
mod error;
pub mod parser;
pub mod preferences;
pub mod ranking;
pub mod resolver;
mod scraper;
mod source;
mod types;
pub mod url;

// Re-export client types
pub use client::{AnigoClient, ClientConfig, PageFetcher, RateLimiter};

// Re-export error types
pub use error::{AnigoError, Result};

// Re-export parser functions
pub use parser::{
    parse_catalog_page, parse_episode_list, parse_server_list, parse_show_detail,
    parse_stream_sources,
};

// Re-export preference types
pub use preferences::{
    MemoryPreferenceStore, PreferenceStore, PreferredQuality, QualityPreferenceOption,
    load_preferred_quality, store_preferred_quality,
};

// Re-export resolution and ranking
pub use ranking::{rank, sort_by_preference};
pub use resolver::{ServerFailureHook, TracingHook, VideoResolver};

// Re-export main scraper API
pub use scraper::AnigoScraper;
pub use source::AnimeSource;

// Re-export data types
pub use types::{
    CatalogEntry, CatalogPage, EpisodeRecord, ServerDescriptor, ShowDetail, ShowStatus,
    StreamCandidate,
};
