//! Canonical in-memory watchlist
//!
//! The manager owns the collection, keeps ids unique, stamps `addedAt`, and
//! writes the full snapshot through the `ItemStore` after every mutation.
//! Reads only ever look at memory. Observers are told about each change
//! synchronously, after the in-memory state and the store write are done.

use std::collections::HashSet;
use std::rc::{Rc, Weak};

use serde::Serialize;

use crate::consts::DEFAULT_LABEL;
use crate::item::{ContentDescriptor, Item, Kind};
use crate::platform::{Clock, SystemClock};
use crate::query::{self, KindFilter};
use crate::store::ItemStore;

/// What a mutation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Added(Item),
    Removed(Item),
    /// Collection emptied; carries how many items were dropped
    Cleared(usize),
}

impl Change {
    pub fn as_str(&self) -> &'static str {
        match self {
            Change::Added(_) => "added",
            Change::Removed(_) => "removed",
            Change::Cleared(_) => "cleared",
        }
    }

    /// Owned, serializable form for observers outside Rust
    pub fn event(&self, count: usize) -> ChangeEvent {
        let (id, item, removed) = match self {
            Change::Added(item) => (Some(item.id.clone()), Some(item.clone()), 0),
            Change::Removed(item) => (Some(item.id.clone()), Some(item.clone()), 1),
            Change::Cleared(n) => (None, None, *n),
        };
        ChangeEvent {
            change: self.as_str(),
            id,
            item,
            removed,
            count,
        }
    }
}

/// A `Change` plus the collection size right after it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEvent {
    pub change: &'static str,
    pub id: Option<String>,
    pub item: Option<Item>,
    /// Items dropped by this change
    pub removed: usize,
    pub count: usize,
}

/// Receives a callback after each successful mutation, with the item
/// count as it stands after the change
pub trait WatchlistObserver {
    fn on_change(&self, change: &Change, count: usize);
}

impl<F> WatchlistObserver for F
where
    F: Fn(&Change, usize),
{
    fn on_change(&self, change: &Change, count: usize) {
        self(change, count)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct WatchlistManager {
    /// Most recently added first
    items: Vec<Item>,
    store: ItemStore,
    clock: Box<dyn Clock>,
    /// Held weakly: dropping the observer ends the subscription
    observers: Vec<(SubscriptionId, Weak<dyn WatchlistObserver>)>,
    next_subscription: u64,
}

impl WatchlistManager {
    /// Create a manager and hydrate it from `store`
    pub fn new(store: ItemStore) -> Self {
        Self::with_clock(store, SystemClock)
    }

    /// Like `new`, stamping `added_at` from `clock`
    pub fn with_clock(store: ItemStore, clock: impl Clock + 'static) -> Self {
        let items = hydrate(store.load());
        Self {
            items,
            store,
            clock: Box::new(clock),
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Add the described content at the front.
    ///
    /// Returns `false` without touching anything if the id is already saved;
    /// the existing item keeps its original `added_at`.
    pub fn add(&mut self, descriptor: &ContentDescriptor, kind: Kind) -> bool {
        if self.contains(&descriptor.id) {
            log::debug!("'{}' already in watchlist", descriptor.id);
            return false;
        }

        let item = Item::from_descriptor(descriptor, kind, self.clock.now_millis());
        log::info!("Added {} '{}' ({})", item.kind, item.label, item.id);
        self.items.insert(0, item.clone());
        self.store.save(&self.items);
        self.notify(&Change::Added(item));
        true
    }

    /// Remove the item with `id`. Returns `false` if there was none.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(pos) = self.items.iter().position(|item| item.id == id) else {
            return false;
        };

        let item = self.items.remove(pos);
        log::info!("Removed '{}' ({})", item.label, item.id);
        self.store.save(&self.items);
        self.notify(&Change::Removed(item));
        true
    }

    /// Whether `id` is saved
    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Number of saved items
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Saved item with `id`, if any
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Canonical order, most recent first
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items of the selected kind, in canonical order
    pub fn filtered(&self, filter: KindFilter) -> Vec<Item> {
        query::filtered(&self.items, filter)
    }

    /// Empty the collection and erase the stored snapshot
    pub fn clear_all(&mut self) {
        let removed = self.items.len();
        self.items.clear();
        self.store.clear();
        log::info!("Watchlist cleared ({} items)", removed);
        self.notify(&Change::Cleared(removed));
    }

    /// Register `observer` for change callbacks until it is dropped or
    /// unsubscribed. Only a weak reference is kept.
    pub fn subscribe<O>(&mut self, observer: &Rc<O>) -> SubscriptionId
    where
        O: WatchlistObserver + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        let weak = Rc::downgrade(observer);
        let weak: Weak<dyn WatchlistObserver> = weak;
        self.observers.push((id, weak));
        id
    }

    /// Returns `false` if `id` was not (or no longer) subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    /// Live observer count; dead ones are pruned first
    pub fn observer_count(&mut self) -> usize {
        self.observers.retain(|(_, weak)| weak.strong_count() > 0);
        self.observers.len()
    }

    fn notify(&mut self, change: &Change) {
        self.observers.retain(|(_, weak)| weak.strong_count() > 0);
        let live: Vec<Rc<dyn WatchlistObserver>> = self
            .observers
            .iter()
            .filter_map(|(_, weak)| weak.upgrade())
            .collect();
        for observer in live {
            observer.on_change(change, self.items.len());
        }
    }
}

/// Restore collection invariants on loaded items: the first occurrence of
/// each id wins, and blank labels become the placeholder
fn hydrate(items: Vec<Item>) -> Vec<Item> {
    let total = items.len();
    let mut seen = HashSet::with_capacity(total);
    let mut unique: Vec<Item> = items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .collect();
    if unique.len() != total {
        log::warn!(
            "Dropped {} duplicate ids from stored watchlist",
            total - unique.len()
        );
    }

    for item in unique.iter_mut().filter(|item| item.label.trim().is_empty()) {
        log::warn!("Stored item '{}' has no label, using placeholder", item.id);
        item.label = DEFAULT_LABEL.to_string();
    }
    unique
}
