//! Favorite prompts
//!
//! A persisted set of catalog prompt ids. Stored as a JSON object mapping
//! each id to `true`, written back after every toggle.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

use crate::storage::{load_or_default, save_json, KeyValueStore, Observers, Persistence};

/// Storage key holding the favorite set.
pub const FAVORITES_KEY: &str = "pv_favorites";

/// Prompt id → presence marker. Absent ids are not favorites.
pub type FavoriteSet = BTreeMap<String, bool>;

pub struct FavoritesStore {
    storage: Arc<dyn KeyValueStore>,
    favorites: FavoriteSet,
    observers: Observers<FavoriteSet>,
}

impl FavoritesStore {
    /// Load the favorite set from `storage`.
    ///
    /// Unreadable or corrupt state yields an empty set.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let favorites: FavoriteSet = load_or_default(storage.as_ref(), FAVORITES_KEY);
        debug!(count = favorites.len(), "Favorites loaded");
        Self {
            storage,
            favorites,
            observers: Observers::default(),
        }
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.get(id).copied().unwrap_or(false)
    }

    /// Flip the favorite state of `id` and persist the result.
    ///
    /// The in-memory change stands even when the write fails.
    pub fn toggle(&mut self, id: &str) -> Persistence {
        if self.is_favorite(id) {
            self.favorites.remove(id);
        } else {
            self.favorites.insert(id.to_string(), true);
        }
        debug!(id = id, favorite = self.is_favorite(id), "Favorite toggled");

        self.observers.notify(&self.favorites);
        self.save()
    }

    /// Write the current set to storage.
    pub fn save(&self) -> Persistence {
        save_json(self.storage.as_ref(), FAVORITES_KEY, &self.favorites)
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    /// Favorited ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.favorites
            .iter()
            .filter(|(_, marked)| **marked)
            .map(|(id, _)| id.as_str())
    }

    pub fn len(&self) -> usize {
        self.ids().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `callback` with the new set after every toggle.
    pub fn subscribe(&mut self, callback: impl FnMut(&FavoriteSet) + 'static) {
        self.observers.push(callback);
    }
}
