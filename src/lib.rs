//! PromptVault - a personal library of reusable prompts
//!
//! Prompts are organized as tab → section → category → prompt. The library
//! document is flattened into a searchable list where every prompt carries a
//! content-derived id, so favorites can refer to prompts without a database.
//! Users can also keep their own prompts next to the library.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use promptvault::{Catalog, FavoritesStore, FileStore, KeyValueStore};
//!
//! let json = std::fs::read_to_string("prompts.json")?;
//! let catalog = Catalog::from_document(promptvault::parse_document(&json)?);
//!
//! let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new("/tmp/vault"));
//! let mut favorites = FavoritesStore::load(storage);
//!
//! for prompt in catalog.search("email") {
//!     println!("{} {}", prompt.id, prompt.text);
//! }
//! if let Some(first) = catalog.prompts().first() {
//!     favorites.toggle(&first.id).log_failure("favorites");
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! - [`identity`]: content-addressed prompt ids
//! - [`catalog`]: document types, flattening, catalog views
//! - [`matching`]: substring search
//! - [`favorites`] and [`custom`]: the two persisted stores
//! - [`storage`]: key-value backends with best-effort persistence
//! - [`source`]: one-shot document loading from a file or URL

pub mod catalog;
pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod custom;
pub mod favorites;
pub mod identity;
pub mod logging;
pub mod matching;
pub mod source;
pub mod storage;
pub mod vault;

pub use catalog::{flatten, parse_document, Catalog, Category, Document, FlatPrompt, Section, Tab};
pub use cli::{Cli, Commands, ConfigCommands, CustomCommands};
pub use clipboard::{Clipboard, ClipboardError, CopyTarget};
pub use config::VaultConfig;
pub use custom::{
    CustomPrompt, CustomPromptStore, IdGenerator, NewPrompt, RandomIds, SequentialIds, CUSTOM_KEY,
};
pub use favorites::{FavoriteSet, FavoritesStore, FAVORITES_KEY};
pub use identity::prompt_id;
pub use logging::{init_logging, log_command_execution, log_store_operation, LogConfig};
pub use matching::{filter, Matcher};
pub use source::{load_document, DocumentSource};
pub use storage::{FileStore, KeyValueStore, MemoryStore, Persistence, StorageError};
pub use vault::{PromptOrigin, PromptRef, Vault};
