//! Preferred video quality setting
//!
//! The adapter has exactly one user setting. The core only reads it: the
//! value is passed into [`crate::ranking::sort_by_preference`] at call time,
//! and persisting it is up to the caller through a [`PreferenceStore`].

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::{AnigoError, Result};

/// Key under which the preference is stored
pub const PREFERRED_QUALITY_KEY: &str = "preferred_quality";

/// Quality placed first when sorting resolved streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PreferredQuality {
    #[default]
    P1080,
    P720,
    P480,
    P360,
}

impl PreferredQuality {
    /// All choices, best first
    pub const ALL: [PreferredQuality; 4] = [
        PreferredQuality::P1080,
        PreferredQuality::P720,
        PreferredQuality::P480,
        PreferredQuality::P360,
    ];

    /// Stored value, also the token matched against quality text
    pub fn value(self) -> &'static str {
        match self {
            PreferredQuality::P1080 => "1080",
            PreferredQuality::P720 => "720",
            PreferredQuality::P480 => "480",
            PreferredQuality::P360 => "360",
        }
    }

    /// Entry shown in a settings list
    pub fn label(self) -> &'static str {
        match self {
            PreferredQuality::P1080 => "1080p",
            PreferredQuality::P720 => "720p",
            PreferredQuality::P480 => "480p",
            PreferredQuality::P360 => "360p",
        }
    }

    /// Reads a stored value, falling back to the default when it is
    /// missing or not one of the known choices
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for PreferredQuality {
    type Err = AnigoError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|q| q.value() == trimmed || q.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| AnigoError::InvalidPreference(s.to_string()))
    }
}

impl TryFrom<String> for PreferredQuality {
    type Error = AnigoError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<PreferredQuality> for String {
    fn from(value: PreferredQuality) -> Self {
        value.value().to_string()
    }
}

impl fmt::Display for PreferredQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Describes the quality setting for a host settings screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityPreferenceOption {
    pub key: String,
    pub title: String,
    pub entries: Vec<String>,
    pub entry_values: Vec<String>,
    pub default_value: String,
}

impl Default for QualityPreferenceOption {
    fn default() -> Self {
        Self {
            key: PREFERRED_QUALITY_KEY.to_string(),
            title: "Preferred video quality".to_string(),
            entries: PreferredQuality::ALL.iter().map(|q| q.label().to_string()).collect(),
            entry_values: PreferredQuality::ALL.iter().map(|q| q.value().to_string()).collect(),
            default_value: PreferredQuality::default().value().to_string(),
        }
    }
}

/// Key-value persistence owned by the host
pub trait PreferenceStore: Send + Sync {
    fn load(&self, key: &str) -> Option<String>;
    fn store(&self, key: &str, value: &str);
}

/// In-process preference store
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self, key: &str) -> Option<String> {
        // A poisoned lock only means a writer panicked mid-insert; the map is still usable.
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.get(key).cloned()
    }

    fn store(&self, key: &str, value: &str) {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
    }
}

/// Loads the preferred quality, defaulting to 1080
pub fn load_preferred_quality(store: &dyn PreferenceStore) -> PreferredQuality {
    PreferredQuality::from_stored(store.load(PREFERRED_QUALITY_KEY).as_deref())
}

/// Persists the preferred quality
pub fn store_preferred_quality(store: &dyn PreferenceStore, quality: PreferredQuality) {
    store.store(PREFERRED_QUALITY_KEY, quality.value());
}
