//! A running vault session
//!
//! Ties the catalog to the two persisted stores. The catalog comes from the
//! document source; favorites and custom prompts share one storage backend
//! but each owns its own key.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::VaultConfig;
use crate::custom::CustomPromptStore;
use crate::favorites::FavoritesStore;
use crate::source::load_document;
use crate::storage::KeyValueStore;

/// Where a looked-up prompt came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOrigin {
    Catalog,
    Custom,
}

/// A prompt found by id, from either the catalog or the custom store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptRef<'a> {
    pub id: &'a str,
    pub tab: &'a str,
    pub section: &'a str,
    pub category: &'a str,
    pub text: &'a str,
    pub origin: PromptOrigin,
}

pub struct Vault {
    pub catalog: Catalog,
    pub favorites: FavoritesStore,
    pub custom: CustomPromptStore,
}

impl Vault {
    /// Load the document and both stores as described by `config`.
    ///
    /// A document that cannot be loaded leaves the catalog pending.
    pub async fn open(config: &VaultConfig) -> Self {
        let catalog = Catalog::from_loaded(load_document(&config.source).await);
        let storage: Arc<dyn KeyValueStore> = Arc::new(config.storage());
        Self::with_storage(catalog, storage)
    }

    pub fn with_storage(catalog: Catalog, storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            catalog,
            favorites: FavoritesStore::load(storage.clone()),
            custom: CustomPromptStore::load(storage),
        }
    }

    /// Look a prompt up by id. Catalog ids start with `p`, custom ids with
    /// `c`, so the two never shadow each other.
    pub fn lookup(&self, id: &str) -> Option<PromptRef<'_>> {
        if let Some(prompt) = self.catalog.prompt(id) {
            return Some(PromptRef {
                id: &prompt.id,
                tab: &prompt.tab,
                section: &prompt.section,
                category: &prompt.category,
                text: &prompt.text,
                origin: PromptOrigin::Catalog,
            });
        }

        self.custom.get(id).map(|prompt| PromptRef {
            id: &prompt.id,
            tab: &prompt.tab,
            section: &prompt.section,
            category: &prompt.category,
            text: &prompt.text,
            origin: PromptOrigin::Custom,
        })
    }
}
