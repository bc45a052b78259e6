// Favorite commands: fav (toggle), favs (list)

use anyhow::{bail, Result};
use colored::*;
use std::io::Write;

use super::catalog::write_catalog_prompts;
use super::write_pending_notice;
use crate::logging::log_store_operation;
use crate::vault::Vault;

/// Toggle a favorite.
///
/// Only library prompts can be favorited; ids already in the set can always
/// be toggled off, even after the library dropped them.
pub fn handle_fav(vault: &mut Vault, id: &str, out: &mut dyn Write) -> Result<()> {
    if vault.catalog.prompt(id).is_none() && !vault.favorites.is_favorite(id) {
        bail!("No library prompt with id '{}'", id);
    }

    let status = vault.favorites.toggle(id);
    log_store_operation("favorites", "toggle", Some(id), &status);

    if vault.favorites.is_favorite(id) {
        writeln!(out, "{} {} added to favorites", "★".yellow(), id.bold())?;
    } else {
        writeln!(out, "☆ {} removed from favorites", id.bold())?;
    }
    Ok(())
}

pub fn handle_favs(vault: &Vault, json: bool, out: &mut dyn Write) -> Result<()> {
    let favorites = vault.catalog.favorites(&vault.favorites);

    if json {
        serde_json::to_writer_pretty(&mut *out, &favorites)?;
        writeln!(out)?;
        return Ok(());
    }

    if vault.catalog.is_pending() {
        return write_pending_notice(out);
    }

    if vault.favorites.is_empty() {
        writeln!(
            out,
            "No favorites yet. Star a prompt with: {}",
            "pv fav <id>".bold()
        )?;
        return Ok(());
    }

    write_catalog_prompts(vault, &favorites, out)
}
