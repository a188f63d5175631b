//! Error types for the AniGo source adapter
//!
//! One enum covers transport, parsing and input validation failures.
//! Errors serialize as their display string so they cross the Tauri
//! boundary unchanged.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all AniGo adapter operations
#[derive(Error, Debug)]
pub enum AnigoError {
    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Failed to parse HTML content
    #[error("Failed to parse HTML: {0}")]
    ParseError(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Rate limited by server (HTTP 429)
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Page not found on server
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server answered with an empty body
    #[error("Empty response from {0}")]
    EmptyResponse(String),

    /// Invalid search query or page number
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Unknown preferred quality value
    #[error("Invalid preference value: {0}")]
    InvalidPreference(String),
}

impl Serialize for AnigoError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for AniGo operations
pub type Result<T> = std::result::Result<T, AnigoError>;
