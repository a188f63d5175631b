//! Episode list parser for AniGo

use scraper::Html;

use super::catalog::selector;
use crate::error::Result;
use crate::types::EpisodeRecord;
use crate::url::{extract_episode_number, to_relative_url};

/// Name used when an episode link has no order label
pub const DEFAULT_EPISODE_NAME: &str = "Episode";

/// Parses the episode list of a show page
///
/// Episodes keep the order of the page. Links without an `href` are
/// skipped; numbers that cannot be extracted are reported as 0.0.
pub fn parse_episode_list(html: &str) -> Result<Vec<EpisodeRecord>> {
    let document = Html::parse_document(html);

    let link_selector = selector("ul.ss-list a")?;
    let order_selector = selector("span.ssli-order")?;

    let episodes = document
        .select(&link_selector)
        .filter_map(|link| {
            let href = link.value().attr("href")?;

            let name = link
                .select(&order_selector)
                .next()
                .map(|span| span.text().collect::<String>().trim().to_string())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| DEFAULT_EPISODE_NAME.to_string());

            Some(EpisodeRecord {
                url: to_relative_url(href),
                name,
                number: extract_episode_number(href),
            })
        })
        .collect();

    Ok(episodes)
}
