//! Durable load/save/clear of the watchlist snapshot
//!
//! The whole collection is serialized as one JSON array under a single key.
//! Failures never reach the caller: a missing or corrupt snapshot loads as an
//! empty collection, and a failed write is logged and dropped. The `try_*`
//! variants expose the underlying `StoreError` for diagnostics.

use crate::consts::STORAGE_KEY;
use crate::error::{Result, StoreError};
use crate::item::Item;
use crate::persistence::KeyValueStorage;

pub struct ItemStore {
    storage: Box<dyn KeyValueStorage>,
    key: String,
}

impl ItemStore {
    /// Store under the default key
    pub fn new(storage: impl KeyValueStorage + 'static) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    /// Store under a custom key
    pub fn with_key(storage: impl KeyValueStorage + 'static, key: impl Into<String>) -> Self {
        Self {
            storage: Box::new(storage),
            key: key.into(),
        }
    }

    /// Key the snapshot lives under
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn try_load(&self) -> Result<Vec<Item>> {
        match self.storage.get(&self.key)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    /// Load the snapshot, or an empty collection if there is none or it is unreadable
    pub fn load(&self) -> Vec<Item> {
        match self.try_load() {
            Ok(items) => {
                log::info!("Loaded {} watchlist items from '{}'", items.len(), self.key());
                items
            }
            Err(StoreError::CorruptPersistedData(e)) => {
                log::warn!("Discarding corrupt watchlist snapshot: {}", e);
                Vec::new()
            }
            Err(e) => {
                log::warn!("Watchlist storage unreadable, starting empty: {}", e);
                Vec::new()
            }
        }
    }

    pub fn try_save(&mut self, items: &[Item]) -> Result<()> {
        let json = serde_json::to_string(items)?;
        self.storage.set(&self.key, &json)
    }

    /// Write the full collection; failure is logged, never returned
    pub fn save(&mut self, items: &[Item]) {
        match self.try_save(items) {
            Ok(()) => log::debug!("Watchlist saved ({} items)", items.len()),
            Err(e) => log::warn!("Watchlist save failed, keeping in-memory state: {}", e),
        }
    }

    pub fn try_clear(&mut self) -> Result<()> {
        self.storage.remove(&self.key)
    }

    /// Erase the snapshot; a missing entry is fine
    pub fn clear(&mut self) {
        match self.try_clear() {
            Ok(()) => log::info!("Watchlist snapshot '{}' cleared", self.key()),
            Err(e) => log::warn!("Watchlist clear failed: {}", e),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::item::Kind;
    use crate::persistence::MemoryStorage;

    /// Backend that refuses every operation
    pub(crate) struct BrokenStorage;

    impl KeyValueStorage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(StoreError::StorageUnavailable("disabled".into()))
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(StoreError::StorageUnavailable("quota exceeded".into()))
        }

        fn remove(&mut self, _key: &str) -> Result<()> {
            Err(StoreError::StorageUnavailable("disabled".into()))
        }
    }

    fn item(id: &str, kind: Kind, label: &str, added_at: i64) -> Item {
        Item {
            id: id.to_string(),
            kind,
            label: label.to_string(),
            thumbnail: format!("/{id}.jpg"),
            added_at,
        }
    }

    #[test]
    fn test_load_missing_is_empty() {
        let store = ItemStore::new(MemoryStorage::new());
        assert!(store.try_load().unwrap().is_empty());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let mut store = ItemStore::new(MemoryStorage::new());
        let items = vec![
            item("1399", Kind::Tv, "Game of Thrones", 300),
            item("550", Kind::Movie, "Fight Club", 200),
            item("13", Kind::Movie, "Forrest Gump", 100),
        ];

        store.save(&items);
        assert_eq!(store.load(), items);
    }

    #[test]
    fn test_corrupt_snapshot_loads_empty() {
        let mut storage = MemoryStorage::new();
        storage.set(STORAGE_KEY, "{not json").unwrap();
        let store = ItemStore::new(storage.clone());

        assert!(matches!(
            store.try_load(),
            Err(StoreError::CorruptPersistedData(_))
        ));
        assert!(store.load().is_empty());

        // Valid JSON, wrong shape
        storage
            .set(STORAGE_KEY, r#"[{"id":"1","kind":"podcast"}]"#)
            .unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_unavailable_storage_degrades() {
        let mut store = ItemStore::new(BrokenStorage);
        assert!(matches!(
            store.try_load(),
            Err(StoreError::StorageUnavailable(_))
        ));
        assert!(store.load().is_empty());

        // Neither of these may panic
        store.save(&[item("550", Kind::Movie, "Fight Club", 1)]);
        store.clear();
        assert!(store.try_save(&[]).is_err());
    }

    #[test]
    fn test_clear_removes_entry() {
        let storage = MemoryStorage::new();
        let mut store = ItemStore::with_key(storage.clone(), "custom_key");
        assert_eq!(store.key(), "custom_key");
        assert_eq!(ItemStore::new(MemoryStorage::new()).key(), STORAGE_KEY);

        store.save(&[item("550", Kind::Movie, "Fight Club", 1)]);
        assert!(storage.raw("custom_key").is_some());

        store.clear();
        assert!(storage.raw("custom_key").is_none());
        // Clearing an absent entry is not an error
        assert!(store.try_clear().is_ok());
    }
}
