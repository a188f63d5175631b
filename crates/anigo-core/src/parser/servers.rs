//! Server list parser for AniGo episode pages

use scraper::Html;

use super::catalog::selector;
use crate::error::Result;
use crate::types::{ServerDescriptor, UNKNOWN_SERVER};

/// Parses the server entries of an episode page in document order
///
/// Elements without a `data-id` attribute are skipped. An empty
/// `data-id` is kept as-is; the resolver decides what to do with it.
/// Duplicate ids are not merged.
pub fn parse_server_list(html: &str) -> Result<Vec<ServerDescriptor>> {
    let document = Html::parse_document(html);
    let server_selector = selector("div.server-item")?;

    let servers = document
        .select(&server_selector)
        .filter_map(|element| {
            let opaque_id = element.value().attr("data-id")?.trim().to_string();
            let label = element
                .value()
                .attr("data-type")
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or(UNKNOWN_SERVER)
                .to_string();

            Some(ServerDescriptor { label, opaque_id })
        })
        .collect();

    Ok(servers)
}
