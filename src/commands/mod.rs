//! Command handlers for the `pv` binary
//!
//! Handlers write to the supplied writer so the same code serves the
//! terminal and the tests.

pub mod catalog;
pub mod configuration;
pub mod custom;
pub mod favorites;

pub use catalog::{handle_copy, handle_find, handle_id, handle_ls, handle_show, handle_tabs};
pub use configuration::handle_config;
pub use custom::handle_custom;
pub use favorites::{handle_fav, handle_favs};

use anyhow::Result;
use colored::*;
use std::io::Write;

use crate::vault::PromptRef;

/// Print one prompt as a two-line entry: marker, id and path, then the text.
pub(crate) fn write_prompt(out: &mut dyn Write, prompt: &PromptRef<'_>, marker: &str) -> Result<()> {
    writeln!(
        out,
        "{} {}  {}",
        marker,
        prompt.id.bold(),
        format!("{} / {} / {}", prompt.tab, prompt.section, prompt.category).dimmed()
    )?;
    for line in prompt.text.lines() {
        writeln!(out, "    {}", line)?;
    }
    Ok(())
}

/// Star shown in front of catalog prompts.
pub(crate) fn favorite_marker(is_favorite: bool) -> String {
    if is_favorite {
        "★".yellow().to_string()
    } else {
        "☆".to_string()
    }
}

pub(crate) fn write_pending_notice(out: &mut dyn Write) -> Result<()> {
    writeln!(
        out,
        "{}: no prompt library loaded. Check the document source with: {}",
        "Note".yellow(),
        "pv config show".bold()
    )?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::catalog::{tests::sample_document, Catalog};
    use crate::custom::{CustomPromptStore, SequentialIds};
    use crate::storage::{KeyValueStore, MemoryStore};
    use crate::vault::Vault;

    /// A vault over the sample document, in-memory storage and predictable
    /// custom ids.
    pub(crate) fn sample_vault() -> Vault {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let mut vault = Vault::with_storage(Catalog::from_document(sample_document()), storage.clone());
        vault.custom = CustomPromptStore::load_with_ids(storage, SequentialIds::default());
        vault
    }

    pub(crate) fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }
}
