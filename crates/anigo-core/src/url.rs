//! URL helper functions for AniGo
//!
//! Builds the listing, search and AJAX endpoints, and converts between
//! absolute URLs and the site-relative references handed to the host.

use std::sync::LazyLock;

use regex::Regex;
use ::url::Url;

use crate::error::{AnigoError, Result};

/// Default site root
pub const BASE_URL: &str = "https://anigo.to";

/// Hyphen followed by a full run of digits
static EPISODE_NUMBER: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"-(\d+)").ok());

/// Builds the home listing URL for a page
///
/// # Example
/// ```
/// use anigo_core::url::build_home_url;
/// let url = build_home_url("https://anigo.to", 2);
/// assert_eq!(url, "https://anigo.to/home?page=2");
/// ```
pub fn build_home_url(base: &str, page: u32) -> String {
    format!("{}/home?page={}", base.trim_end_matches('/'), page)
}

/// Builds the search URL for a query and page
///
/// # Example
/// ```
/// use anigo_core::url::build_search_url;
/// let url = build_search_url("https://anigo.to", "one piece", 1);
/// assert_eq!(url, "https://anigo.to/search?keyword=one%20piece&page=1");
/// ```
pub fn build_search_url(base: &str, query: &str, page: u32) -> String {
    format!(
        "{}/search?keyword={}&page={}",
        base.trim_end_matches('/'),
        urlencoding::encode(query),
        page
    )
}

/// Builds the AJAX endpoint listing the sources of one server
///
/// # Example
/// ```
/// use anigo_core::url::build_sources_url;
/// let url = build_sources_url("https://anigo.to", "8841");
/// assert_eq!(url, "https://anigo.to/ajax/episode/sources/8841");
/// ```
pub fn build_sources_url(base: &str, server_id: &str) -> String {
    format!(
        "{}/ajax/episode/sources/{}",
        base.trim_end_matches('/'),
        urlencoding::encode(server_id)
    )
}

/// Strips scheme and host from an absolute URL
///
/// Relative hrefs are returned unchanged.
///
/// # Example
/// ```
/// use anigo_core::url::to_relative_url;
/// assert_eq!(to_relative_url("https://anigo.to/anime/frieren?ep=1"), "/anime/frieren?ep=1");
/// assert_eq!(to_relative_url("/anime/frieren"), "/anime/frieren");
/// ```
pub fn to_relative_url(href: &str) -> String {
    let href = href.trim();
    match Url::parse(href) {
        Ok(parsed) if parsed.has_host() => {
            let mut relative = parsed.path().to_string();
            if let Some(query) = parsed.query() {
                relative.push('?');
                relative.push_str(query);
            }
            if let Some(fragment) = parsed.fragment() {
                relative.push('#');
                relative.push_str(fragment);
            }
            relative
        }
        _ => href.to_string(),
    }
}

/// Resolves a site-relative reference against the base URL
///
/// Absolute URLs pass through unchanged.
///
/// # Errors
/// Returns `InvalidUrl` if the base or the reference cannot be parsed
pub fn absolute_url(base: &str, reference: &str) -> Result<String> {
    let reference = reference.trim();
    if reference.is_empty() {
        return Err(AnigoError::InvalidUrl("empty reference".to_string()));
    }
    let base = Url::parse(base).map_err(|e| AnigoError::InvalidUrl(format!("{}: {}", base, e)))?;
    base.join(reference)
        .map(String::from)
        .map_err(|e| AnigoError::InvalidUrl(format!("{}: {}", reference, e)))
}

/// Extracts the episode number from an episode href
///
/// Takes the last run of digits that follows a hyphen, so a numbered show
/// slug does not shadow the episode suffix. Returns 0.0 when there is none.
///
/// # Example
/// ```
/// use anigo_core::url::extract_episode_number;
/// assert_eq!(extract_episode_number("/watch/show/episode-12"), 12.0);
/// assert_eq!(extract_episode_number("/watch/show/episode-abc"), 0.0);
/// ```
pub fn extract_episode_number(href: &str) -> f32 {
    if let Some(re) = EPISODE_NUMBER.as_ref()
        && let Some(caps) = re.captures_iter(href).last()
        && let Some(m) = caps.get(1)
        && let Ok(number) = m.as_str().parse::<f32>()
    {
        return number;
    }
    0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_home_url() {
        assert_eq!(build_home_url(BASE_URL, 1), "https://anigo.to/home?page=1");
    }

    #[test]
    fn test_build_home_url_trailing_slash() {
        assert_eq!(
            build_home_url("http://127.0.0.1:8080/", 3),
            "http://127.0.0.1:8080/home?page=3"
        );
    }

    #[test]
    fn test_build_search_url_encodes_keyword() {
        let url = build_search_url(BASE_URL, "re:zero & more", 2);
        assert_eq!(url, "https://anigo.to/search?keyword=re%3Azero%20%26%20more&page=2");
    }

    #[test]
    fn test_build_sources_url() {
        assert_eq!(
            build_sources_url(BASE_URL, "s1"),
            "https://anigo.to/ajax/episode/sources/s1"
        );
    }

    #[test]
    fn test_to_relative_url_keeps_query_and_fragment() {
        assert_eq!(
            to_relative_url("https://anigo.to/watch/frieren/episode-3?lang=sub#player"),
            "/watch/frieren/episode-3?lang=sub#player"
        );
    }

    #[test]
    fn test_to_relative_url_passthrough() {
        assert_eq!(to_relative_url("/anime/frieren"), "/anime/frieren");
        assert_eq!(to_relative_url("  anime/frieren "), "anime/frieren");
    }

    #[test]
    fn test_absolute_url_from_relative() {
        let url = absolute_url(BASE_URL, "/watch/frieren/episode-3").unwrap();
        assert_eq!(url, "https://anigo.to/watch/frieren/episode-3");
    }

    #[test]
    fn test_absolute_url_passthrough() {
        let url = absolute_url(BASE_URL, "https://mirror.example/watch/x").unwrap();
        assert_eq!(url, "https://mirror.example/watch/x");
    }

    #[test]
    fn test_absolute_url_empty_reference() {
        assert!(matches!(absolute_url(BASE_URL, "  "), Err(AnigoError::InvalidUrl(_))));
    }

    #[test]
    fn test_absolute_url_invalid_base() {
        assert!(matches!(absolute_url("not a base", "/x"), Err(AnigoError::InvalidUrl(_))));
    }

    #[test]
    fn test_extract_episode_number() {
        assert_eq!(extract_episode_number("/watch/show/episode-12"), 12.0);
        assert_eq!(extract_episode_number("/watch/show/episode-7?lang=dub"), 7.0);
    }

    #[test]
    fn test_extract_episode_number_fallback() {
        assert_eq!(extract_episode_number("/watch/show/episode-abc"), 0.0);
        assert_eq!(extract_episode_number(""), 0.0);
    }

    #[test]
    fn test_extract_episode_number_ignores_show_id() {
        assert_eq!(extract_episode_number("/watch/one-piece-100/episode-5"), 5.0);
        assert_eq!(extract_episode_number("/watch/frieren-18542/special"), 18542.0);
    }

    #[test]
    fn test_extract_episode_number_adjacent_runs() {
        assert_eq!(extract_episode_number("/watch/show-2024-12"), 12.0);
        assert_eq!(extract_episode_number("/watch/show-1-2-3"), 3.0);
    }
}
