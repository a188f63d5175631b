//! Source fragment parser for the AniGo AJAX endpoint
//!
//! `/ajax/episode/sources/<id>` answers with an HTML fragment holding one
//! `<source>` element per stream:
//!
//! ```html
//! <video><source src="https://cdn.example/hls/master.m3u8" label="HD" size="1080"></video>
//! ```

use scraper::Html;

use super::catalog::selector;
use crate::error::Result;
use crate::types::StreamCandidate;

/// Quality label used when a source has no `label`
pub const DEFAULT_QUALITY_LABEL: &str = "Default";

/// Extracts stream candidates from a server's source fragment
///
/// Sources whose `src` does not start with "http" are dropped.
///
/// # Arguments
/// * `body` - Raw response body of the sources endpoint
/// * `server_label` - Label of the server the fragment belongs to
pub fn parse_stream_sources(body: &str, server_label: &str) -> Result<Vec<StreamCandidate>> {
    let fragment = Html::parse_fragment(body);
    let source_selector = selector("source")?;

    let candidates = fragment
        .select(&source_selector)
        .filter_map(|source| {
            let url = source.value().attr("src").unwrap_or_default().trim();
            if !url.starts_with("http") {
                return None;
            }

            let label = source
                .value()
                .attr("label")
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .unwrap_or(DEFAULT_QUALITY_LABEL);
            let resolution = source
                .value()
                .attr("size")
                .and_then(|size| size.trim().parse::<u32>().ok());

            Some(StreamCandidate {
                url: url.to_string(),
                quality: compose_quality(resolution, label, server_label),
                server: server_label.to_string(),
            })
        })
        .collect();

    Ok(candidates)
}

/// Builds the quality text shown to the user
///
/// With a numeric resolution: `"<res>p - <server>"`; otherwise
/// `"<server> - <label>"`.
pub fn compose_quality(resolution: Option<u32>, label: &str, server_label: &str) -> String {
    match resolution {
        Some(res) => format!("{}p - {}", res, server_label),
        None => format!("{} - {}", server_label, label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sources_with_resolution() {
        let body = r#"
            <video>
                <source src="https://cdn.example/a/1080.m3u8" label="FHD" size="1080" type="application/x-mpegURL">
                <source src="https://cdn.example/a/720.m3u8" label="HD" size="720">
            </video>
        "#;

        let candidates = parse_stream_sources(body, "sub").unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].url, "https://cdn.example/a/1080.m3u8");
        assert_eq!(candidates[0].quality, "1080p - sub");
        assert_eq!(candidates[0].server, "sub");
        assert_eq!(candidates[1].quality, "720p - sub");
    }

    #[test]
    fn test_parse_sources_without_resolution() {
        let body = r#"<video>
            <source src="https://cdn.example/b.mp4" label="Backup">
            <source src="http://cdn.example/c.mp4" size="auto">
        </video>"#;

        let candidates = parse_stream_sources(body, "dub").unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].quality, "dub - Backup");
        assert_eq!(candidates[1].quality, "dub - Default");
    }

    #[test]
    fn test_non_http_sources_are_dropped() {
        let body = r#"<video>
            <source src="javascript:void(0)" size="1080">
            <source src="/relative/path.m3u8" size="720">
            <source label="no src">
            <source src="blob:https://anigo.to/123">
        </video>"#;

        assert!(parse_stream_sources(body, "sub").unwrap().is_empty());
    }

    #[test]
    fn test_bare_source_elements() {
        let body = r#"<source src="https://cdn.example/a.m3u8" size="1080">"#;
        let candidates = parse_stream_sources(body, "Unknown Server").unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].quality, "1080p - Unknown Server");
    }

    #[test]
    fn test_body_without_sources() {
        assert!(parse_stream_sources("{\"status\":false}", "sub").unwrap().is_empty());
    }
}
