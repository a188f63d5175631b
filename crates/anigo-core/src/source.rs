//! Operation set a host application drives a catalog source through

use async_trait::async_trait;

use crate::error::Result;
use crate::preferences::PreferredQuality;
use crate::types::{CatalogPage, EpisodeRecord, ShowDetail, StreamCandidate};

/// A browsable anime catalog
///
/// Show and episode references are the site-relative URLs found in
/// [`crate::CatalogEntry::url`] and [`EpisodeRecord::url`]; absolute URLs
/// are accepted too.
#[async_trait]
pub trait AnimeSource: Send + Sync {
    /// Display name of the source
    fn name(&self) -> &str;

    /// ISO 639-1 language of the catalog
    fn lang(&self) -> &str;

    fn base_url(&self) -> &str;

    /// Whether [`AnimeSource::list_latest`] is meaningful
    fn supports_latest(&self) -> bool;

    /// Popular shows, 1-based page
    async fn list_popular(&self, page: u32) -> Result<CatalogPage>;

    /// Recently updated shows, 1-based page
    async fn list_latest(&self, page: u32) -> Result<CatalogPage>;

    async fn search(&self, query: &str, page: u32) -> Result<CatalogPage>;

    async fn fetch_detail(&self, show_ref: &str) -> Result<ShowDetail>;

    /// Episodes in the order the site lists them
    async fn list_episodes(&self, show_ref: &str) -> Result<Vec<EpisodeRecord>>;

    /// Playable streams of an episode, unsorted
    async fn resolve_videos(&self, episode_ref: &str) -> Result<Vec<StreamCandidate>>;

    /// Orders resolved streams with the preferred quality first
    fn sort(
        &self,
        candidates: Vec<StreamCandidate>,
        preference: PreferredQuality,
    ) -> Vec<StreamCandidate>;
}
