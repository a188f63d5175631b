//! Multi-server video resolution
//!
//! An episode page lists several upstream servers. Each one is asked for
//! its sources independently; a server that fails is reported to a
//! [`ServerFailureHook`] and skipped, so one broken backend never hides the
//! streams of the others.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, warn};

use crate::client::PageFetcher;
use crate::error::{AnigoError, Result};
use crate::parser::{parse_server_list, parse_stream_sources};
use crate::types::{ServerDescriptor, StreamCandidate};
use crate::url::build_sources_url;

/// Receives the servers that were skipped during resolution
pub trait ServerFailureHook: Send + Sync {
    fn server_failed(&self, server: &ServerDescriptor, error: &AnigoError);
}

/// Default hook: logs the failure and moves on
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHook;

impl ServerFailureHook for TracingHook {
    fn server_failed(&self, server: &ServerDescriptor, error: &AnigoError) {
        warn!(
            server = %server.label,
            id = %server.opaque_id,
            error = %error,
            "skipping server"
        );
    }
}

/// Resolves episode pages into stream candidates
#[derive(Clone)]
pub struct VideoResolver {
    concurrency: usize,
    hook: Arc<dyn ServerFailureHook>,
}

impl Default for VideoResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoResolver {
    /// Resolver querying up to 4 servers at a time, logging failures
    pub fn new() -> Self {
        Self {
            concurrency: 4,
            hook: Arc::new(TracingHook),
        }
    }

    /// Sets how many servers are queried at once (at least 1)
    ///
    /// Output order does not depend on this value.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Replaces the hook notified about skipped servers
    pub fn with_hook(mut self, hook: Arc<dyn ServerFailureHook>) -> Self {
        self.hook = hook;
        self
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Resolves all playable streams of an episode
    ///
    /// # Returns
    /// Candidates in server order, each server's streams in page order.
    /// Empty when no server produced anything.
    ///
    /// # Errors
    /// Only when the episode page itself cannot be fetched or parsed;
    /// per-server failures never surface here.
    pub async fn resolve<F>(&self, fetcher: &F, episode_url: &str) -> Result<Vec<StreamCandidate>>
    where
        F: PageFetcher + ?Sized,
    {
        let html = fetcher.fetch_page(episode_url).await?;
        let servers = parse_server_list(&html)?;
        debug!(episode = episode_url, servers = servers.len(), "discovered servers");

        Ok(self.resolve_servers(fetcher, &servers).await)
    }

    /// Resolves a known list of servers
    ///
    /// Servers with an empty id are ignored without being reported.
    pub async fn resolve_servers<F>(
        &self,
        fetcher: &F,
        servers: &[ServerDescriptor],
    ) -> Vec<StreamCandidate>
    where
        F: PageFetcher + ?Sized,
    {
        let targets: Vec<ServerDescriptor> = servers
            .iter()
            .filter(|s| !s.opaque_id.is_empty())
            .cloned()
            .collect();

        // `buffered` yields in input order, whatever order the fetches finish in.
        let batches: Vec<(ServerDescriptor, Result<Vec<StreamCandidate>>)> = stream::iter(targets)
            .map(|server| async move {
                let result = self.resolve_server(fetcher, &server).await;
                (server, result)
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let mut candidates = Vec::new();
        for (server, batch) in batches {
            match batch {
                Ok(found) => {
                    debug!(
                        server = %server.label,
                        id = %server.opaque_id,
                        streams = found.len(),
                        "server resolved"
                    );
                    candidates.extend(found);
                }
                Err(e) => self.hook.server_failed(&server, &e),
            }
        }
        candidates
    }

    /// Fetches and parses the sources of one server
    ///
    /// # Errors
    /// Any fetch failure for this server: transport errors, non-success
    /// status, or an empty body.
    pub async fn resolve_server<F>(
        &self,
        fetcher: &F,
        server: &ServerDescriptor,
    ) -> Result<Vec<StreamCandidate>>
    where
        F: PageFetcher + ?Sized,
    {
        let url = build_sources_url(fetcher.base_url(), &server.opaque_id);
        let body = fetcher.fetch_ajax(&url).await?;
        parse_stream_sources(&body, &server.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;

    const BASE: &str = "https://anigo.test";

    /// Serves canned bodies; unknown URLs fail like a 404
    #[derive(Default)]
    struct StubFetcher {
        pages: HashMap<String, String>,
        delays: HashMap<String, u64>,
        requested: Mutex<Vec<String>>,
    }

    impl StubFetcher {
        fn page(mut self, url: &str, body: &str) -> Self {
            self.pages.insert(url.to_string(), body.to_string());
            self
        }

        fn source(self, id: &str, body: &str) -> Self {
            let url = build_sources_url(BASE, id);
            self.page(&url, body)
        }

        fn delay(mut self, id: &str, millis: u64) -> Self {
            self.delays.insert(build_sources_url(BASE, id), millis);
            self
        }

        fn requested(&self) -> Vec<String> {
            self.requested.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for StubFetcher {
        fn base_url(&self) -> &str {
            BASE
        }

        async fn fetch_page(&self, url: &str) -> Result<String> {
            self.requested.lock().unwrap().push(url.to_string());
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| AnigoError::NotFound(url.to_string()))
        }

        async fn fetch_ajax(&self, url: &str) -> Result<String> {
            if let Some(millis) = self.delays.get(url) {
                tokio::time::sleep(Duration::from_millis(*millis)).await;
            }
            let body = self.fetch_page(url).await?;
            if body.trim().is_empty() {
                return Err(AnigoError::EmptyResponse(url.to_string()));
            }
            Ok(body)
        }
    }

    #[derive(Default)]
    struct RecordingHook {
        failed: Mutex<Vec<String>>,
    }

    impl ServerFailureHook for RecordingHook {
        fn server_failed(&self, server: &ServerDescriptor, _error: &AnigoError) {
            self.failed.lock().unwrap().push(server.opaque_id.clone());
        }
    }

    fn episode_page(servers: &[(&str, &str)]) -> String {
        let items: String = servers
            .iter()
            .map(|(label, id)| {
                format!(r#"<div class="server-item" data-type="{label}" data-id="{id}"></div>"#)
            })
            .collect();
        format!("<html><body><div class=\"servers\">{items}</div></body></html>")
    }

    #[tokio::test]
    async fn test_resolve_skips_empty_ids_and_bad_urls() {
        let fetcher = StubFetcher::default()
            .page(
                "/watch/show/episode-1",
                &episode_page(&[("sub", "s1"), ("sub", ""), ("dub", "s2")]),
            )
            .source("s1", r#"<video><source src="https://cdn/a.m3u8" size="1080"></video>"#)
            .source("s2", r#"<video><source src="javascript:void(0)"></video>"#);

        let candidates = VideoResolver::new()
            .resolve(&fetcher, "/watch/show/episode-1")
            .await
            .unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].url, "https://cdn/a.m3u8");
        assert!(candidates[0].quality.contains("1080"));

        // The empty id is never requested.
        let requested = fetcher.requested();
        assert_eq!(requested.len(), 3);
        assert!(!requested.iter().any(|u| u.ends_with("/sources/")));
    }

    #[tokio::test]
    async fn test_all_servers_failing_yields_empty() {
        let hook = Arc::new(RecordingHook::default());
        let fetcher = StubFetcher::default()
            .page("/ep", &episode_page(&[("sub", "s1"), ("dub", "s2")]))
            .source("s2", "   ");

        let candidates = VideoResolver::new()
            .with_hook(hook.clone())
            .resolve(&fetcher, "/ep")
            .await
            .unwrap();

        assert!(candidates.is_empty());
        assert_eq!(*hook.failed.lock().unwrap(), vec!["s1", "s2"]);
    }

    #[tokio::test]
    async fn test_episode_page_failure_is_an_error() {
        let fetcher = StubFetcher::default();
        let result = VideoResolver::new().resolve(&fetcher, "/missing").await;
        assert!(matches!(result, Err(AnigoError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_order_follows_servers_not_completion() {
        let fetcher = StubFetcher::default()
            .source(
                "slow",
                r#"<source src="https://cdn/slow-1.m3u8" size="1080"><source src="https://cdn/slow-2.m3u8" size="720">"#,
            )
            .source("fast", r#"<source src="https://cdn/fast.m3u8" label="HD">"#)
            .delay("slow", 50);

        let servers = vec![
            ServerDescriptor {
                label: "sub".to_string(),
                opaque_id: "slow".to_string(),
            },
            ServerDescriptor {
                label: "dub".to_string(),
                opaque_id: "fast".to_string(),
            },
        ];

        let candidates = VideoResolver::new()
            .with_concurrency(2)
            .resolve_servers(&fetcher, &servers)
            .await;

        let urls: Vec<&str> = candidates.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://cdn/slow-1.m3u8", "https://cdn/slow-2.m3u8", "https://cdn/fast.m3u8"]
        );
        assert_eq!(candidates[2].quality, "dub - HD");
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_fetched_twice() {
        let fetcher = StubFetcher::default()
            .source("dup", r#"<source src="https://cdn/dup.m3u8" size="480">"#);

        let server = ServerDescriptor {
            label: "sub".to_string(),
            opaque_id: "dup".to_string(),
        };
        let candidates = VideoResolver::new()
            .with_concurrency(1)
            .resolve_servers(&fetcher, &[server.clone(), server])
            .await;

        assert_eq!(candidates.len(), 2);
        assert_eq!(fetcher.requested().len(), 2);
    }

    #[test]
    fn test_concurrency_is_at_least_one() {
        assert_eq!(VideoResolver::new().with_concurrency(0).concurrency(), 1);
        assert_eq!(VideoResolver::default().concurrency(), 4);
    }
}
