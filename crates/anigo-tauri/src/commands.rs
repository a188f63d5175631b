//! Tauri commands for the AniGo source
//!
//! Each command maps one [`anigo_core::AnimeSource`] operation or the quality setting
//! onto the frontend. Errors are returned as their display string.

use anigo_core::{
    CatalogPage, EpisodeRecord, PreferredQuality, QualityPreferenceOption,
    ShowDetail, StreamCandidate, load_preferred_quality, store_preferred_quality,
};
use tauri::State;

use crate::ScraperState;

/// Popular shows, 1-based page
#[tauri::command]
pub async fn list_popular(
    state: State<'_, ScraperState>,
    page: u32,
) -> Result<CatalogPage, String> {
    state.scraper.list_popular(page).await.map_err(|e| e.to_string())
}

/// Latest updated shows, 1-based page
#[tauri::command]
pub async fn list_latest(
    state: State<'_, ScraperState>,
    page: u32,
) -> Result<CatalogPage, String> {
    state.scraper.list_latest(page).await.map_err(|e| e.to_string())
}

/// Search shows by keyword
///
/// # Errors
/// Returns error message as String if the query is empty or the fetch fails
#[tauri::command]
pub async fn search_anime(
    state: State<'_, ScraperState>,
    query: String,
    page: u32,
) -> Result<CatalogPage, String> {
    state
        .scraper
        .search(&query, page)
        .await
        .map_err(|e| e.to_string())
}

/// Show metadata for a show reference from a listing
#[tauri::command]
pub async fn fetch_detail(
    state: State<'_, ScraperState>,
    show_url: String,
) -> Result<ShowDetail, String> {
    state
        .scraper
        .fetch_detail(&show_url)
        .await
        .map_err(|e| e.to_string())
}

/// Episode list of a show
#[tauri::command]
pub async fn list_episodes(
    state: State<'_, ScraperState>,
    show_url: String,
) -> Result<Vec<EpisodeRecord>, String> {
    state
        .scraper
        .list_episodes(&show_url)
        .await
        .map_err(|e| e.to_string())
}

/// Playable streams of an episode, preferred quality first
///
/// An empty list means no server produced a playable source.
#[tauri::command]
pub async fn resolve_videos(
    state: State<'_, ScraperState>,
    episode_url: String,
) -> Result<Vec<StreamCandidate>, String> {
    let videos = state
        .scraper
        .resolve_videos(&episode_url)
        .await
        .map_err(|e| e.to_string())?;
    let preference = load_preferred_quality(state.preferences.as_ref());
    Ok(state.scraper.sort(videos, preference))
}

#[tauri::command]
pub fn get_preferred_quality(state: State<'_, ScraperState>) -> PreferredQuality {
    load_preferred_quality(state.preferences.as_ref())
}

/// Stores a new preferred quality ("1080", "720", "480" or "360")
#[tauri::command]
pub fn set_preferred_quality(
    state: State<'_, ScraperState>,
    value: String,
) -> Result<PreferredQuality, String> {
    let quality = value.parse::<PreferredQuality>().map_err(|e| e.to_string())?;
    store_preferred_quality(state.preferences.as_ref(), quality);
    Ok(quality)
}

/// Settings descriptor for the quality list
#[tauri::command]
pub fn quality_preference_option() -> QualityPreferenceOption {
    QualityPreferenceOption::default()
}
