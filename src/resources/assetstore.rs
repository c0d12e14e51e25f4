//! Asset store resources.
//!
//! [`AssetStore`] maps string keys to loaded handles. A handle is loaded on
//! the first request for its key and the same handle is returned for every
//! later request. A failed load is remembered as an empty slot, so callers
//! get `None` and the loader is never invoked again for that key.
//!
//! [`FontStore`] and [`TextureStore`] are the concrete stores used by the
//! arcade.
//!
//! Note: both are non-send resources because Raylib fonts and textures must
//! be accessed from the main thread only.

use log::{info, warn};
use raylib::prelude::{Font, Texture2D};
use rustc_hash::FxHashMap;

/// Key of the font every screen draws with.
pub const MAIN_FONT: &str = "main";
/// Key of the optional texture drawn behind the menu.
pub const MENU_BACKGROUND: &str = "menu_background";

/// Lazily populated map of asset keys to handles.
///
/// This is a non-send resource when `T` is a Raylib handle; use
/// `NonSend<...>` in system parameters.
pub struct AssetStore<T> {
    slots: FxHashMap<String, Option<T>>,
}

/// Loaded fonts keyed by name.
pub type FontStore = AssetStore<Font>;
/// Loaded textures keyed by name.
pub type TextureStore = AssetStore<Texture2D>;

impl<T> Default for AssetStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> AssetStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            slots: FxHashMap::default(),
        }
    }

    /// Return the handle stored under `id`, loading it on first request.
    ///
    /// `load` runs at most once per key. On failure the error is logged,
    /// the slot stays empty and `None` is returned now and on every later
    /// call.
    pub fn get_or_load<F>(&mut self, id: &str, load: F) -> Option<&T>
    where
        F: FnOnce() -> Result<T, String>,
    {
        if !self.slots.contains_key(id) {
            let slot = match load() {
                Ok(handle) => {
                    info!("Loaded asset '{}'", id);
                    Some(handle)
                }
                Err(e) => {
                    warn!("Failed to load asset '{}': {}", id, e);
                    None
                }
            };
            self.slots.insert(id.to_string(), slot);
        }
        self.slots.get(id).and_then(Option::as_ref)
    }

    /// Get an already loaded handle without triggering a load.
    pub fn get(&self, id: impl AsRef<str>) -> Option<&T> {
        self.slots.get(id.as_ref()).and_then(Option::as_ref)
    }

    /// Whether a load was already attempted for `id`, successful or not.
    pub fn was_requested(&self, id: impl AsRef<str>) -> bool {
        self.slots.contains_key(id.as_ref())
    }

    /// Number of successfully loaded handles.
    pub fn len(&self) -> usize {
        self.slots.values().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_first_request_loads() {
        let mut store: AssetStore<u32> = AssetStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get_or_load("a", || Ok(7)), Some(&7));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a"), Some(&7));
    }

    #[test]
    fn test_repeat_request_reuses_handle() {
        let mut store: AssetStore<u32> = AssetStore::new();
        let calls = Cell::new(0);
        let loader = || {
            calls.set(calls.get() + 1);
            Ok(calls.get())
        };
        assert_eq!(store.get_or_load("a", loader), Some(&1));
        assert_eq!(
            store.get_or_load("a", || {
                calls.set(calls.get() + 1);
                Ok(99)
            }),
            Some(&1)
        );
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_failed_load_is_cached_empty() {
        let mut store: AssetStore<u32> = AssetStore::new();
        assert_eq!(store.get_or_load("missing", || Err("nope".into())), None);
        assert!(store.was_requested("missing"));

        let mut retried = false;
        let again = store.get_or_load("missing", || {
            retried = true;
            Ok(1)
        });
        assert_eq!(again, None);
        assert!(!retried);
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_does_not_load() {
        let store: AssetStore<u32> = AssetStore::new();
        assert_eq!(store.get("a"), None);
        assert!(!store.was_requested("a"));
    }
}
