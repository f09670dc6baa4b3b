//! Watchlist configuration
//!
//! Serializable so a host page can hand it over as JSON.

use serde::{Deserialize, Serialize};

use crate::consts::STORAGE_KEY;
use crate::query::{KindFilter, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key the snapshot is stored under
    pub storage_key: String,
    /// Order used by `Watchlist::default_view`
    pub default_order: SortOrder,
    /// Filter used by `Watchlist::default_view`
    pub default_filter: KindFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            default_order: SortOrder::Newest,
            default_filter: KindFilter::All,
        }
    }
}

impl Settings {
    /// Parse settings JSON, falling back to defaults for anything unreadable
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) if !settings.storage_key.trim().is_empty() => settings,
            Ok(_) => {
                log::warn!("Empty storage key in settings, using defaults");
                Self::default()
            }
            Err(e) => {
                log::warn!("Invalid watchlist settings, using defaults: {}", e);
                Self::default()
            }
        }
    }
}
