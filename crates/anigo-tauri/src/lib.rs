//! AniGo Tauri Integration
//!
//! Provides a Tauri plugin exposing the AniGo source adapter to a frontend.
//!
//! # Usage
//!
//! Register the plugin in your Tauri application:
//!
//! ```ignore
//! fn main() {
//!     tauri::Builder::default()
//!         .plugin(anigo_tauri::init())
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
//!
//! Then invoke commands from the frontend:
//!
//! ```javascript
//! import { invoke } from '@tauri-apps/api/core';
//!
//! const page = await invoke('plugin:anigo|search_anime', { query: 'frieren', page: 1 });
//! const episodes = await invoke('plugin:anigo|list_episodes', { showUrl: page.entries[0].url });
//! await invoke('plugin:anigo|set_preferred_quality', { value: '720' });
//! const videos = await invoke('plugin:anigo|resolve_videos', { episodeUrl: episodes[0].url });
//! ```

use std::sync::Arc;

use anigo_core::{AnigoScraper, ClientConfig, MemoryPreferenceStore, PreferenceStore};
use tauri::{
    Manager, Runtime,
    plugin::{Builder, TauriPlugin},
};

mod commands;

/// Shared state behind every command
///
/// The scraper is immutable after construction and only needs an `Arc`;
/// its rate limiter synchronizes internally. The preference store is
/// swappable so hosts can plug in their own persistence.
pub struct ScraperState {
    pub(crate) scraper: Arc<AnigoScraper>,
    pub(crate) preferences: Arc<dyn PreferenceStore>,
}

impl ScraperState {
    /// Create a new ScraperState with default configuration and an
    /// in-memory preference store
    ///
    /// # Errors
    /// Returns error string if scraper initialization fails
    pub fn new() -> Result<Self, String> {
        Self::with_config(ClientConfig::default(), Arc::new(MemoryPreferenceStore::new()))
    }

    /// Create a ScraperState with a custom client configuration and store
    pub fn with_config(
        config: ClientConfig,
        preferences: Arc<dyn PreferenceStore>,
    ) -> Result<Self, String> {
        let scraper = AnigoScraper::with_config(config).map_err(|e| e.to_string())?;
        Ok(Self {
            scraper: Arc::new(scraper),
            preferences,
        })
    }
}

/// Initialize the anigo plugin
///
/// # Example
/// ```ignore
/// tauri::Builder::default()
///     .plugin(anigo_tauri::init())
///     .run(tauri::generate_context!())
///     .expect("error while running tauri application");
/// ```
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    Builder::new("anigo")
        .invoke_handler(tauri::generate_handler![
            commands::list_popular,
            commands::list_latest,
            commands::search_anime,
            commands::fetch_detail,
            commands::list_episodes,
            commands::resolve_videos,
            commands::get_preferred_quality,
            commands::set_preferred_quality,
            commands::quality_preference_option
        ])
        .setup(|app, _api| {
            let state = ScraperState::new().map_err(Box::<dyn std::error::Error>::from)?;
            app.manage(state);
            Ok(())
        })
        .build()
}

// Re-export types for convenience
pub use anigo_core::{CatalogEntry as Anime, EpisodeRecord as Episode, StreamCandidate as Video};

#[cfg(test)]
mod tests {
    use super::*;
    use anigo_core::{PreferredQuality, load_preferred_quality, store_preferred_quality};

    #[test]
    fn test_scraper_state_creation() {
        let state = ScraperState::new();
        assert!(state.is_ok());
    }

    #[test]
    fn test_scraper_state_invalid_base_url() {
        let config = ClientConfig {
            base_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        let state = ScraperState::with_config(config, Arc::new(MemoryPreferenceStore::new()));
        assert!(state.is_err());
    }

    #[test]
    fn test_state_preferences_default_and_update() {
        let state = ScraperState::new().unwrap();
        assert_eq!(load_preferred_quality(state.preferences.as_ref()), PreferredQuality::P1080);

        store_preferred_quality(state.preferences.as_ref(), PreferredQuality::P360);
        assert_eq!(load_preferred_quality(state.preferences.as_ref()), PreferredQuality::P360);
    }
}
