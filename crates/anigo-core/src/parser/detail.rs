//! Show detail page parser for AniGo

use scraper::{ElementRef, Html};

use super::catalog::{NO_TITLE, selector};
use crate::error::Result;
use crate::types::{ShowDetail, ShowStatus};

/// Parses a show page into its metadata
///
/// Missing fields fall back to `None`, an empty genre list, or
/// [`ShowStatus::Unknown`]; the parse itself only fails on a bad selector.
pub fn parse_show_detail(html: &str) -> Result<ShowDetail> {
    let document = Html::parse_document(html);

    let title_selector = selector("h2.film-name")?;
    let description_selector = selector("div.film-description")?;
    let info_selector = selector("div.item")?;
    let link_selector = selector("a")?;
    let poster_selector = selector("img.film-poster-img")?;

    let title = document
        .select(&title_selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| NO_TITLE.to_string());

    let description = document
        .select(&description_selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|d| !d.is_empty());

    let info_items: Vec<ElementRef> = document.select(&info_selector).collect();

    let genres: Vec<String> = labelled(&info_items, "Genre")
        .flat_map(|item| item.select(&link_selector))
        .map(|a| a.text().collect::<String>().trim().to_string())
        .filter(|g| !g.is_empty())
        .collect();

    let status_text = labelled(&info_items, "Status")
        .next()
        .map(|item| item.text().collect::<String>());
    let status = parse_status(status_text.as_deref());

    let studio = labelled(&info_items, "Studio")
        .next()
        .and_then(|item| item.select(&link_selector).next())
        .map(|a| a.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty());

    let thumbnail_url = document
        .select(&poster_selector)
        .next()
        .and_then(|img| img.value().attr("data-src"))
        .map(|src| src.trim().to_string())
        .filter(|src| !src.is_empty());

    Ok(ShowDetail {
        title,
        description,
        genres,
        status,
        studio,
        thumbnail_url,
    })
}

/// Info items whose text mentions `label`, ignoring case
fn labelled<'a, 'html>(
    items: &'a [ElementRef<'html>],
    label: &str,
) -> impl Iterator<Item = &'a ElementRef<'html>> {
    let needle = label.to_lowercase();
    items.iter().filter(move |item| {
        item.text()
            .collect::<String>()
            .to_lowercase()
            .contains(&needle)
    })
}

/// Maps the status line of a detail page to a [`ShowStatus`]
pub fn parse_status(text: Option<&str>) -> ShowStatus {
    let Some(text) = text.map(str::to_lowercase).filter(|t| !t.is_empty()) else {
        return ShowStatus::Unknown;
    };

    if text.contains("currently airing") {
        ShowStatus::Ongoing
    } else if text.contains("finished airing") {
        ShowStatus::Completed
    } else {
        ShowStatus::Unknown
    }
}
