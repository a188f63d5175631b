//! Listing page parser for AniGo
//!
//! Home, latest and search pages share the same card grid, so one parser
//! serves all three.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AnigoError, Result};
use crate::types::{CatalogEntry, CatalogPage};
use crate::url::to_relative_url;

/// Title used when a card has no title link
pub const NO_TITLE: &str = "No Title";

/// Parses a listing page into entries and a next-page flag
///
/// Cards without a link are skipped; every other field falls back.
///
/// # Errors
/// Returns `ParseError` if a selector fails to compile
pub fn parse_catalog_page(html: &str) -> Result<CatalogPage> {
    let document = Html::parse_document(html);

    let item_selector = selector("div.film_list-wrap div.flw-item")?;
    let next_selector = selector("ul.pagination li.page-item a[title=next]")?;

    let entries = document
        .select(&item_selector)
        .filter_map(|item| parse_catalog_item(&item))
        .collect();

    let has_next_page = document.select(&next_selector).next().is_some();

    Ok(CatalogPage {
        entries,
        has_next_page,
    })
}

/// Parses a single `div.flw-item` card
fn parse_catalog_item(element: &ElementRef) -> Option<CatalogEntry> {
    let link_selector = Selector::parse("a[href]").ok()?;
    let img_selector = Selector::parse("img").ok()?;
    let title_selector = Selector::parse("h3.film-name a").ok()?;

    let href = element
        .select(&link_selector)
        .next()
        .and_then(|a| a.value().attr("href"))?;

    let thumbnail_url = element
        .select(&img_selector)
        .next()
        .and_then(|img| img.value().attr("data-src"))
        .map(|src| src.trim().to_string())
        .filter(|src| !src.is_empty());

    let title = element
        .select(&title_selector)
        .next()
        .map(|a| a.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    Some(CatalogEntry {
        title,
        url: to_relative_url(href),
        thumbnail_url,
    })
}

pub(crate) fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| AnigoError::ParseError(format!("Invalid selector {}: {:?}", css, e)))
}
