//! Prompt catalog: the taxonomy document and its flattened index
//!
//! The library is shipped as a nested document (tab → section → category →
//! prompts). Everything downstream, search and favorites included, works on
//! the flat list of [`FlatPrompt`] records built here.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::favorites::FavoritesStore;
use crate::identity::prompt_id;
use crate::matching;

/// The full taxonomy document, tabs in display order.
pub type Document = Vec<Tab>;

/// Outermost grouping level
///
/// Missing fields deserialize as empty values rather than failing the whole
/// document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tab {
    #[serde(default)]
    pub tab: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub section: String,
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub prompts: Vec<String>,
}

/// A single prompt with its full taxonomy path and derived id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatPrompt {
    pub id: String,
    pub tab: String,
    pub section: String,
    pub category: String,
    pub text: String,
}

/// Parse a taxonomy document from its JSON text.
pub fn parse_document(json: &str) -> Result<Document, serde_json::Error> {
    serde_json::from_str(json)
}

/// Flatten a document into prompt records, preserving document order.
pub fn flatten(document: &[Tab]) -> Vec<FlatPrompt> {
    let mut prompts = Vec::new();

    for tab in document {
        for section in &tab.sections {
            for category in &section.categories {
                for text in &category.prompts {
                    prompts.push(FlatPrompt {
                        id: prompt_id(&tab.tab, &section.section, &category.category, text),
                        tab: tab.tab.clone(),
                        section: section.section.clone(),
                        category: category.category.clone(),
                        text: text.clone(),
                    });
                }
            }
        }
    }

    prompts
}

/// Session-owned catalog
///
/// Starts out pending (no document yet) and is rebuilt wholesale whenever a
/// new document is supplied. The flat index is never edited in place.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    document: Option<Document>,
    prompts: Vec<FlatPrompt>,
}

impl Catalog {
    /// A catalog still waiting for its document. Behaves as empty.
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn from_document(document: Document) -> Self {
        let prompts = flatten(&document);
        debug!(
            tabs = document.len(),
            prompts = prompts.len(),
            "Catalog indexed"
        );
        Self {
            document: Some(document),
            prompts,
        }
    }

    /// Build from an optional load result; `None` keeps the catalog pending.
    pub fn from_loaded(document: Option<Document>) -> Self {
        document.map(Self::from_document).unwrap_or_default()
    }

    /// Swap in a new document and rebuild the index.
    pub fn replace(&mut self, document: Document) {
        *self = Self::from_document(document);
    }

    pub fn is_pending(&self) -> bool {
        self.document.is_none()
    }

    /// All prompts in document order.
    pub fn prompts(&self) -> &[FlatPrompt] {
        &self.prompts
    }

    /// Tab names in document order.
    pub fn tabs(&self) -> Vec<&str> {
        self.document
            .iter()
            .flatten()
            .map(|tab| tab.tab.as_str())
            .collect()
    }

    pub fn tab(&self, name: &str) -> Option<&Tab> {
        self.document.iter().flatten().find(|tab| tab.tab == name)
    }

    /// First prompt carrying `id`. Colliding ids resolve to the earliest one.
    pub fn prompt(&self, id: &str) -> Option<&FlatPrompt> {
        self.prompts.iter().find(|prompt| prompt.id == id)
    }

    /// Prompts belonging to one tab, in document order.
    pub fn prompts_in_tab<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FlatPrompt> + 'a {
        self.prompts.iter().filter(move |prompt| prompt.tab == name)
    }

    pub fn search(&self, query: &str) -> Vec<&FlatPrompt> {
        matching::filter(&self.prompts, query)
    }

    /// Favorited catalog prompts, in document order.
    pub fn favorites(&self, favorites: &FavoritesStore) -> Vec<&FlatPrompt> {
        self.prompts
            .iter()
            .filter(|prompt| favorites.is_favorite(&prompt.id))
            .collect()
    }
}
