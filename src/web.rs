//! JavaScript bindings
//!
//! Exposes a `Watchlist` backed by LocalStorage to page code. Descriptors and
//! views cross the boundary as JSON strings.

use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::item::{ContentDescriptor, Kind};
use crate::manager::{Change, SubscriptionId, WatchlistObserver};
use crate::persistence::{LocalStorage, MemoryStorage};
use crate::query::{KindFilter, SortOrder};
use crate::settings::Settings;
use crate::watchlist::Watchlist;

/// Calls a JS function with a `ChangeEvent` JSON string.
///
/// The call is queued as a microtask so it runs after the mutating method
/// has released its borrow of the handle; callbacks may read it freely.
struct JsObserver {
    callback: js_sys::Function,
}

impl WatchlistObserver for JsObserver {
    fn on_change(&self, change: &Change, count: usize) {
        let json = match serde_json::to_string(&change.event(count)) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to encode watchlist change: {}", e);
                return;
            }
        };
        let callback = self.callback.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                log::warn!("Watchlist observer threw: {:?}", e);
            }
        });
    }
}

#[wasm_bindgen(js_name = Watchlist)]
pub struct WebWatchlist {
    inner: Watchlist,
    /// JS-facing handles for live subscriptions
    subscriptions: HashMap<u32, SubscriptionId>,
    next_handle: u32,
}

#[wasm_bindgen(js_class = Watchlist)]
impl WebWatchlist {
    /// `settings_json` may be omitted; unknown or bad fields fall back to defaults
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: Option<String>) -> WebWatchlist {
        let settings = settings_json
            .as_deref()
            .map(Settings::from_json)
            .unwrap_or_default();

        let inner = if LocalStorage::is_available() {
            Watchlist::with_settings(LocalStorage::new(), settings)
        } else {
            log::warn!("LocalStorage unavailable, watchlist will not persist");
            Watchlist::with_settings(MemoryStorage::new(), settings)
        };

        WebWatchlist {
            inner,
            subscriptions: HashMap::new(),
            next_handle: 0,
        }
    }

    /// Add a content descriptor (JSON). `kind` overrides the descriptor's
    /// `media_type` when given.
    pub fn add(&mut self, descriptor_json: &str, kind: Option<String>) -> Result<bool, JsError> {
        let descriptor: ContentDescriptor = serde_json::from_str(descriptor_json)?;
        match kind.as_deref() {
            Some(k) => {
                let kind =
                    Kind::from_str(k).ok_or_else(|| JsError::new(&format!("unknown kind {k:?}")))?;
                Ok(self.inner.add(&descriptor, kind))
            }
            None => Ok(self.inner.add_tagged(&descriptor)),
        }
    }

    /// Drop a saved title; `false` if it was not saved
    pub fn remove(&mut self, id: &str) -> bool {
        self.inner.remove(id)
    }

    /// Whether `id` is saved
    pub fn contains(&self, id: &str) -> bool {
        self.inner.contains(id)
    }

    /// Number of saved titles
    pub fn count(&self) -> usize {
        self.inner.count()
    }

    /// Remove everything, including the stored snapshot
    #[wasm_bindgen(js_name = clearAll)]
    pub fn clear_all(&mut self) {
        self.inner.clear_all();
    }

    /// JSON array of items. Missing selectors use the configured defaults.
    pub fn view(&self, kind: Option<String>, order: Option<String>) -> Result<String, JsError> {
        let filter = match kind.as_deref() {
            Some(k) => {
                KindFilter::from_str(k).ok_or_else(|| JsError::new(&format!("unknown kind {k:?}")))?
            }
            None => self.inner.settings().default_filter,
        };
        let order = match order.as_deref() {
            Some(o) => SortOrder::from_str(o)
                .ok_or_else(|| JsError::new(&format!("unknown sort order {o:?}")))?,
            None => self.inner.settings().default_order,
        };
        Ok(serde_json::to_string(&self.inner.view(filter, order))?)
    }

    /// Register `callback(eventJson)`, called after each change with
    /// `{change, id, item, removed, count}`. Returns a handle for `unsubscribe`.
    pub fn subscribe(&mut self, callback: js_sys::Function) -> u32 {
        let id = self.inner.subscribe_owned(Rc::new(JsObserver { callback }));
        let handle = self.next_handle;
        self.next_handle = self.next_handle.wrapping_add(1);
        self.subscriptions.insert(handle, id);
        handle
    }

    pub fn unsubscribe(&mut self, handle: u32) -> bool {
        match self.subscriptions.remove(&handle) {
            Some(id) => self.inner.unsubscribe(id),
            None => false,
        }
    }
}

/// Install the console logger and panic hook
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Already installed
        log::debug!("Logger already initialized");
    }
}

#[wasm_bindgen(start)]
pub fn start() {
    init_logging();
    log::info!("Watchlist module loaded");
}
