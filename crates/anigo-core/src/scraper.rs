//! Main scraper API for AniGo
//!
//! Provides the high-level API combining HTTP client, parsers and the
//! video resolver.

use async_trait::async_trait;

use crate::client::{AnigoClient, ClientConfig, PageFetcher};
use crate::error::{AnigoError, Result};
use crate::parser::{parse_catalog_page, parse_episode_list, parse_show_detail};
use crate::preferences::PreferredQuality;
use crate::ranking::sort_by_preference;
use crate::resolver::VideoResolver;
use crate::source::AnimeSource;
use crate::types::{CatalogPage, EpisodeRecord, ShowDetail, StreamCandidate};
use crate::url::{build_home_url, build_search_url};

/// Main scraper API for AniGo
///
/// Combines the rate-limited HTTP client with the HTML parsers and the
/// multi-server resolver. Implements [`AnimeSource`].
pub struct AnigoScraper {
    client: AnigoClient,
    resolver: VideoResolver,
}

impl AnigoScraper {
    /// Create a new scraper with default configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new scraper with custom client configuration
    ///
    /// # Errors
    /// Returns error if HTTP client initialization fails
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let resolver = VideoResolver::new().with_concurrency(config.server_concurrency);
        let client = AnigoClient::with_config(config)?;
        Ok(Self { client, resolver })
    }

    /// Replace the resolver, e.g. to install a custom failure hook
    pub fn with_resolver(mut self, resolver: VideoResolver) -> Self {
        self.resolver = resolver;
        self
    }

    /// Popular shows from the home listing
    ///
    /// # Arguments
    /// * `page` - 1-based page number
    ///
    /// # Errors
    /// - `InvalidQuery` if page is 0
    /// - `HttpError`, `HttpStatus`, `NotFound`, `RateLimited` if the page cannot be fetched
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> anigo_core::Result<()> {
    /// use anigo_core::AnigoScraper;
    /// let scraper = AnigoScraper::new()?;
    /// let page = scraper.list_popular(1).await?;
    /// for entry in &page.entries {
    ///     println!("{}: {}", entry.title, entry.url);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn list_popular(&self, page: u32) -> Result<CatalogPage> {
        validate_page(page)?;
        let url = build_home_url(self.client.base_url(), page);
        let html = self.client.fetch_page(&url).await?;
        parse_catalog_page(&html)
    }

    /// Latest updates
    ///
    /// The site has no separate feed; this reads the same home listing
    /// as [`AnigoScraper::list_popular`].
    pub async fn list_latest(&self, page: u32) -> Result<CatalogPage> {
        self.list_popular(page).await
    }

    /// Search shows by keyword
    ///
    /// # Errors
    /// - `InvalidQuery` if query is empty or whitespace only, or page is 0
    /// - `HttpError` and friends if the page cannot be fetched
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> anigo_core::Result<()> {
    /// use anigo_core::AnigoScraper;
    /// let scraper = AnigoScraper::new()?;
    /// let results = scraper.search("frieren", 1).await?;
    /// println!("{} results, more: {}", results.entries.len(), results.has_next_page);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search(&self, query: &str, page: u32) -> Result<CatalogPage> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(AnigoError::InvalidQuery(
                "Search query cannot be empty".to_string(),
            ));
        }
        validate_page(page)?;

        let url = build_search_url(self.client.base_url(), trimmed, page);
        let html = self.client.fetch_page(&url).await?;
        parse_catalog_page(&html)
    }

    /// Show metadata from its detail page
    pub async fn fetch_detail(&self, show_ref: &str) -> Result<ShowDetail> {
        let html = self.client.fetch_page(show_ref).await?;
        parse_show_detail(&html)
    }

    /// Episode list from a show page
    pub async fn list_episodes(&self, show_ref: &str) -> Result<Vec<EpisodeRecord>> {
        let html = self.client.fetch_page(show_ref).await?;
        parse_episode_list(&html)
    }

    /// Resolve playable streams for an episode
    ///
    /// Servers that fail are skipped; an empty result means no playable
    /// source was found.
    ///
    /// # Errors
    /// Only when the episode page itself cannot be fetched
    ///
    /// # Example
    /// ```no_run
    /// # async fn example() -> anigo_core::Result<()> {
    /// use anigo_core::{AnigoScraper, PreferredQuality};
    /// let scraper = AnigoScraper::new()?;
    /// let videos = scraper.resolve_videos("/watch/frieren-18542/episode-1").await?;
    /// for video in scraper.sort(videos, PreferredQuality::P720) {
    ///     println!("{}: {}", video.quality, video.url);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn resolve_videos(&self, episode_ref: &str) -> Result<Vec<StreamCandidate>> {
        self.resolver.resolve(&self.client, episode_ref).await
    }

    /// Put streams matching the preferred quality first
    pub fn sort(
        &self,
        candidates: Vec<StreamCandidate>,
        preference: PreferredQuality,
    ) -> Vec<StreamCandidate> {
        sort_by_preference(candidates, preference)
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }
}

fn validate_page(page: u32) -> Result<()> {
    if page == 0 {
        return Err(AnigoError::InvalidQuery("Page numbers start at 1".to_string()));
    }
    Ok(())
}

#[async_trait]
impl AnimeSource for AnigoScraper {
    fn name(&self) -> &str {
        "AniGo"
    }

    fn lang(&self) -> &str {
        "en"
    }

    fn base_url(&self) -> &str {
        AnigoScraper::base_url(self)
    }

    fn supports_latest(&self) -> bool {
        true
    }

    async fn list_popular(&self, page: u32) -> Result<CatalogPage> {
        AnigoScraper::list_popular(self, page).await
    }

    async fn list_latest(&self, page: u32) -> Result<CatalogPage> {
        AnigoScraper::list_latest(self, page).await
    }

    async fn search(&self, query: &str, page: u32) -> Result<CatalogPage> {
        AnigoScraper::search(self, query, page).await
    }

    async fn fetch_detail(&self, show_ref: &str) -> Result<ShowDetail> {
        AnigoScraper::fetch_detail(self, show_ref).await
    }

    async fn list_episodes(&self, show_ref: &str) -> Result<Vec<EpisodeRecord>> {
        AnigoScraper::list_episodes(self, show_ref).await
    }

    async fn resolve_videos(&self, episode_ref: &str) -> Result<Vec<StreamCandidate>> {
        AnigoScraper::resolve_videos(self, episode_ref).await
    }

    fn sort(
        &self,
        candidates: Vec<StreamCandidate>,
        preference: PreferredQuality,
    ) -> Vec<StreamCandidate> {
        AnigoScraper::sort(self, candidates, preference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scraper_creation() {
        let scraper = AnigoScraper::new();
        assert!(scraper.is_ok());
    }

    #[test]
    fn test_scraper_with_custom_config() {
        let config = ClientConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            requests_per_second: 1.0,
            timeout_secs: 60,
            server_concurrency: 1,
        };
        let scraper = AnigoScraper::with_config(config).unwrap();
        assert_eq!(scraper.base_url(), "http://127.0.0.1:9");
        assert_eq!(scraper.resolver.concurrency(), 1);
    }

    #[test]
    fn test_source_metadata() {
        let scraper = AnigoScraper::new().unwrap();
        let source: &dyn AnimeSource = &scraper;
        assert_eq!(source.name(), "AniGo");
        assert_eq!(source.lang(), "en");
        assert_eq!(source.base_url(), "https://anigo.to");
        assert!(source.supports_latest());
    }

    #[tokio::test]
    async fn test_search_empty_query() {
        let scraper = AnigoScraper::new().unwrap();
        let result = scraper.search("", 1).await;
        match result {
            Err(AnigoError::InvalidQuery(msg)) => {
                assert!(msg.contains("empty"));
            }
            _ => panic!("Expected InvalidQuery error"),
        }
    }

    #[tokio::test]
    async fn test_search_whitespace_query() {
        let scraper = AnigoScraper::new().unwrap();
        let result = scraper.search("   ", 1).await;
        assert!(matches!(result, Err(AnigoError::InvalidQuery(_))));
    }

    #[tokio::test]
    async fn test_page_zero_rejected() {
        let scraper = AnigoScraper::new().unwrap();
        assert!(matches!(scraper.list_popular(0).await, Err(AnigoError::InvalidQuery(_))));
        assert!(matches!(scraper.search("frieren", 0).await, Err(AnigoError::InvalidQuery(_))));
    }

    #[test]
    fn test_sort_through_trait() {
        let scraper = AnigoScraper::new().unwrap();
        let source: &dyn AnimeSource = &scraper;
        let candidates = vec![
            StreamCandidate {
                url: "https://cdn/a".to_string(),
                quality: "720p - sub".to_string(),
                server: "sub".to_string(),
            },
            StreamCandidate {
                url: "https://cdn/b".to_string(),
                quality: "1080p - sub".to_string(),
                server: "sub".to_string(),
            },
        ];
        let sorted = source.sort(candidates, PreferredQuality::P1080);
        assert_eq!(sorted[0].url, "https://cdn/b");
    }
}
