//! Watchlist - a persisted, deduplicated list of saved movies and shows
//!
//! Core modules:
//! - `item`: Saved items and inbound content descriptors
//! - `persistence`: Key-value backends (LocalStorage on web, files natively)
//! - `store`: Snapshot load/save/clear with corruption recovery
//! - `query`: Pure filter/sort views
//! - `manager`: Canonical in-memory collection, uniqueness, change observers
//! - `watchlist`: The facade presentation code talks to
//! - `web`: JavaScript bindings (wasm32 only)

pub mod error;
pub mod item;
pub mod manager;
pub mod persistence;
pub mod platform;
pub mod query;
pub mod settings;
pub mod store;
pub mod watchlist;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::StoreError;
pub use item::{ContentDescriptor, Item, Kind};
pub use manager::{Change, SubscriptionId, WatchlistManager, WatchlistObserver};
pub use persistence::{KeyValueStorage, MemoryStorage};
pub use platform::{Clock, SystemClock};
pub use query::{KindFilter, SortOrder};
pub use settings::Settings;
pub use store::ItemStore;
pub use watchlist::Watchlist;

/// Watchlist constants
pub mod consts {
    /// Storage key for the persisted snapshot
    pub const STORAGE_KEY: &str = "watchlist";
    /// Label used when a descriptor has neither title nor name
    pub const DEFAULT_LABEL: &str = "Untitled";
    /// Environment variable naming the native data directory
    pub const DATA_DIR_ENV: &str = "WATCHLIST_DATA_DIR";
    /// Native data directory when nothing else is configured
    pub const DEFAULT_DATA_DIR: &str = ".watchlist";
}
