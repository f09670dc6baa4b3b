//! The call surface presentation code uses
//!
//! `Watchlist` wraps a hydrated `WatchlistManager` and the query layer. Every
//! read goes to the in-memory collection, so a read issued right after a
//! mutation always sees it, whatever happened to the storage write.

use std::collections::HashMap;
use std::rc::Rc;

use crate::item::{ContentDescriptor, Item, Kind};
use crate::manager::{SubscriptionId, WatchlistManager, WatchlistObserver};
use crate::persistence::KeyValueStorage;
use crate::query::{self, KindFilter, SortOrder};
use crate::settings::Settings;
use crate::store::ItemStore;

pub struct Watchlist {
    manager: WatchlistManager,
    settings: Settings,
    /// Observers this facade keeps alive until they are unsubscribed
    owned: HashMap<SubscriptionId, Rc<dyn WatchlistObserver>>,
}

impl Watchlist {
    /// Open the watchlist stored in `storage` with default settings
    pub fn open(storage: impl KeyValueStorage + 'static) -> Self {
        Self::with_settings(storage, Settings::default())
    }

    /// Open with explicit settings; the snapshot key comes from `settings`
    pub fn with_settings(storage: impl KeyValueStorage + 'static, settings: Settings) -> Self {
        let store = ItemStore::with_key(storage, settings.storage_key.clone());
        Self::from_manager(WatchlistManager::new(store), settings)
    }

    /// Wrap an already constructed manager
    pub fn from_manager(manager: WatchlistManager, settings: Settings) -> Self {
        Self {
            manager,
            settings,
            owned: HashMap::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Save `descriptor` as `kind` at the front. `false` if the id was already saved.
    pub fn add(&mut self, descriptor: &ContentDescriptor, kind: Kind) -> bool {
        self.manager.add(descriptor, kind)
    }

    /// Add using the descriptor's own `media_type`; `false` if it has none we know
    pub fn add_tagged(&mut self, descriptor: &ContentDescriptor) -> bool {
        match descriptor.kind_hint() {
            Some(kind) => self.manager.add(descriptor, kind),
            None => {
                log::warn!(
                    "Cannot add '{}': unknown media type {:?}",
                    descriptor.id,
                    descriptor.media_type
                );
                false
            }
        }
    }

    /// Drop the item with `id`. `false` if it was not saved.
    pub fn remove(&mut self, id: &str) -> bool {
        self.manager.remove(id)
    }

    /// Add if absent, remove if present. Returns whether it is now saved.
    pub fn toggle(&mut self, descriptor: &ContentDescriptor, kind: Kind) -> bool {
        if self.manager.contains(&descriptor.id) {
            self.manager.remove(&descriptor.id);
            false
        } else {
            self.manager.add(descriptor, kind);
            true
        }
    }

    /// Empty the list and erase the stored snapshot
    pub fn clear_all(&mut self) {
        self.manager.clear_all();
    }

    /// Whether `id` is saved
    pub fn contains(&self, id: &str) -> bool {
        self.manager.contains(id)
    }

    /// Number of saved items
    pub fn count(&self) -> usize {
        self.manager.count()
    }

    pub fn is_empty(&self) -> bool {
        self.manager.is_empty()
    }

    /// Saved item with `id`, if any
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.manager.get(id)
    }

    /// All items in canonical order, most recent first
    pub fn items(&self) -> &[Item] {
        self.manager.items()
    }

    /// Items of the selected kind, in canonical order
    pub fn filtered(&self, filter: KindFilter) -> Vec<Item> {
        self.manager.filtered(filter)
    }

    /// All items in `order`
    pub fn sorted(&self, order: SortOrder) -> Vec<Item> {
        query::sorted(self.manager.items(), order)
    }

    /// Filter, then sort
    pub fn view(&self, filter: KindFilter, order: SortOrder) -> Vec<Item> {
        query::view(self.manager.items(), filter, order)
    }

    /// `view` with the configured default filter and order
    pub fn default_view(&self) -> Vec<Item> {
        self.view(self.settings.default_filter, self.settings.default_order)
    }

    /// Per-kind totals, in `Kind::ALL` order
    pub fn counts_by_kind(&self) -> Vec<(Kind, usize)> {
        Kind::ALL
            .iter()
            .map(|&kind| {
                let n = self.items().iter().filter(|i| i.kind == kind).count();
                (kind, n)
            })
            .collect()
    }

    /// Register an observer the caller keeps alive; dropping it unsubscribes
    pub fn subscribe<O>(&mut self, observer: &Rc<O>) -> SubscriptionId
    where
        O: WatchlistObserver + 'static,
    {
        self.manager.subscribe(observer)
    }

    /// Register an observer and keep it alive here until `unsubscribe`
    pub fn subscribe_owned<O>(&mut self, observer: Rc<O>) -> SubscriptionId
    where
        O: WatchlistObserver + 'static,
    {
        let id = self.manager.subscribe(&observer);
        let observer: Rc<dyn WatchlistObserver> = observer;
        self.owned.insert(id, observer);
        id
    }

    /// Stop notifying `id` and release it if this facade owned it
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.owned.remove(&id);
        self.manager.unsubscribe(id)
    }
}
