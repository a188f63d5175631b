//! Core data types for the AniGo adapter
//!
//! Records produced by the parsers and handed to the host. All of them
//! implement Serialize and Deserialize for Tauri compatibility.

use serde::{Deserialize, Serialize};

/// Label used when a server element carries no `data-type`
pub const UNKNOWN_SERVER: &str = "Unknown Server";

/// One show on a listing, search or home page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Show title, "No Title" when the card has none
    pub title: String,

    /// Site-relative URL of the show page (e.g., "/anime/one-piece-100")
    pub url: String,

    /// Lazy-loaded poster URL
    pub thumbnail_url: Option<String>,
}

/// A parsed listing page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CatalogPage {
    pub entries: Vec<CatalogEntry>,

    /// Whether the pager links to a following page
    pub has_next_page: bool,
}

/// Airing status of a show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowStatus {
    #[default]
    Unknown,
    Ongoing,
    Completed,
}

/// Metadata from a show's detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowDetail {
    pub title: String,
    pub description: Option<String>,

    /// Genres in page order
    pub genres: Vec<String>,

    pub status: ShowStatus,

    /// Producing studio, reported to the host as the author
    pub studio: Option<String>,

    pub thumbnail_url: Option<String>,
}

impl ShowDetail {
    /// Genres joined the way the host displays them ("Action, Comedy")
    pub fn genre_line(&self) -> String {
        self.genres.join(", ")
    }
}

/// One episode in a show's episode list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Site-relative URL of the episode page
    pub url: String,

    /// Display name (e.g., "Episode 12")
    pub name: String,

    /// Best-effort episode number, 0.0 when unknown
    pub number: f32,
}

/// A streaming backend offered on an episode page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDescriptor {
    /// Server name from `data-type`, or [`UNKNOWN_SERVER`]
    pub label: String,

    /// Id used to query the server's sources; empty ids are never fetched
    pub opaque_id: String,
}

/// A playable stream resolved from one server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamCandidate {
    /// Stream URL, always starting with "http"
    pub url: String,

    /// Human-readable quality text (e.g., "1080p - Sub")
    pub quality: String,

    /// Label of the server this stream came from
    pub server: String,
}
