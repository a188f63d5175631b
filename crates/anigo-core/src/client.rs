//! HTTP client with rate limiting for AniGo
//!
//! Provides the [`PageFetcher`] seam used by the resolver and a
//! rate-limited reqwest implementation of it. Requests are never retried:
//! a failed fetch is reported once and the caller decides what to skip.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue, REFERER};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::debug;

use crate::error::{AnigoError, Result};
use crate::url::{BASE_URL, absolute_url};

/// Header marking a request as an in-page AJAX call
pub const X_REQUESTED_WITH: &str = "X-Requested-With";

/// Configuration for the HTTP client and scraper
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Site root (default: "https://anigo.to")
    pub base_url: String,
    /// Maximum requests per second (default: 2.0)
    pub requests_per_second: f64,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Servers resolved at once per episode (default: 4)
    pub server_concurrency: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            requests_per_second: 2.0,
            timeout_secs: 30,
            server_concurrency: 4,
        }
    }
}

/// Rate limiter to control request frequency
///
/// Ensures requests are spaced at least `min_interval` apart.
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// Non-positive rates disable limiting.
    pub fn new(requests_per_second: f64) -> Self {
        let min_interval = if requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::ZERO
        };
        let start = Instant::now().checked_sub(min_interval).unwrap_or_else(Instant::now);
        Self {
            min_interval,
            last_request: Arc::new(Mutex::new(start)),
        }
    }

    /// Acquire permission to make a request
    ///
    /// Sleeps until the minimum interval since the previous request has elapsed.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last = Instant::now();
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Fetches pages from the site
///
/// The resolver only talks to the site through this trait, which keeps the
/// transport swappable.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Site root that AJAX endpoints are built from
    fn base_url(&self) -> &str;

    /// Fetch a page by absolute URL or site-relative reference
    async fn fetch_page(&self, url: &str) -> Result<String>;

    /// Fetch an AJAX endpoint; a blank body is an error
    async fn fetch_ajax(&self, url: &str) -> Result<String>;
}

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// HTTP client wrapper with rate limiting
///
/// Handles all HTTP communication with AniGo:
/// - Rate limiting to avoid overwhelming the server
/// - Default headers (User-Agent, Accept-Language, Referer)
/// - Status mapping into [`AnigoError`]
pub struct AnigoClient {
    client: reqwest::Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl AnigoClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    /// - `InvalidUrl` - `base_url` is not a valid absolute URL
    /// - `HttpError` - reqwest client could not be built
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        ::url::Url::parse(&base_url)
            .map_err(|e| AnigoError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        let referer = HeaderValue::from_str(&format!("{}/", base_url))
            .map_err(|_| AnigoError::InvalidUrl(base_url.clone()))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(REFERER, referer);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::limited(5))
            .default_headers(headers)
            .build()
            .map_err(AnigoError::HttpError)?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.requests_per_second),
            base_url,
        })
    }

    /// Perform a single GET and return the body of a successful response
    ///
    /// # Errors
    /// - `HttpError` - Network errors
    /// - `RateLimited` - Server returned 429
    /// - `NotFound` - Server returned 404
    /// - `HttpStatus` - Any other non-success status
    async fn get(&self, url: &str, ajax: bool) -> Result<String> {
        let url = absolute_url(&self.base_url, url)?;

        self.rate_limiter.acquire().await;
        debug!(%url, ajax, "GET");

        let mut request = self.client.get(&url);
        if ajax {
            request = request.header(X_REQUESTED_WITH, "XMLHttpRequest");
        }
        let response = request.send().await.map_err(AnigoError::HttpError)?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AnigoError::RateLimited);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AnigoError::NotFound(url));
        }
        if !status.is_success() {
            return Err(AnigoError::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        response.text().await.map_err(AnigoError::HttpError)
    }

    /// Get a reference to the rate limiter (for testing)
    pub fn rate_limiter(&self) -> &RateLimiter {
        &self.rate_limiter
    }
}

#[async_trait]
impl PageFetcher for AnigoClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        self.get(url, false).await
    }

    async fn fetch_ajax(&self, url: &str) -> Result<String> {
        let body = self.get(url, true).await?;
        if body.trim().is_empty() {
            return Err(AnigoError::EmptyResponse(url.to_string()));
        }
        Ok(body)
    }
}
