// Catalog commands: tabs, ls, find, show, copy, id

use anyhow::{anyhow, bail, Result};
use colored::*;
use std::io::Write;
use std::time::Instant;
use tracing::debug;

use super::{favorite_marker, write_pending_notice, write_prompt};
use crate::catalog::FlatPrompt;
use crate::clipboard::CopyTarget;
use crate::identity::prompt_id;
use crate::vault::{PromptOrigin, PromptRef, Vault};

fn as_ref(prompt: &FlatPrompt) -> PromptRef<'_> {
    PromptRef {
        id: &prompt.id,
        tab: &prompt.tab,
        section: &prompt.section,
        category: &prompt.category,
        text: &prompt.text,
        origin: PromptOrigin::Catalog,
    }
}

/// Print catalog prompts with their favorite markers.
pub(crate) fn write_catalog_prompts(
    vault: &Vault,
    prompts: &[&FlatPrompt],
    out: &mut dyn Write,
) -> Result<()> {
    for prompt in prompts {
        let marker = favorite_marker(vault.favorites.is_favorite(&prompt.id));
        write_prompt(out, &as_ref(prompt), &marker)?;
    }
    Ok(())
}

pub fn handle_tabs(vault: &Vault, out: &mut dyn Write) -> Result<()> {
    if vault.catalog.is_pending() {
        return write_pending_notice(out);
    }

    for tab in vault.catalog.tabs() {
        let count = vault.catalog.prompts_in_tab(tab).count();
        writeln!(out, "{:<24} {}", tab.bold(), format!("{} prompts", count).dimmed())?;
    }
    Ok(())
}

pub fn handle_ls(
    vault: &Vault,
    tab: Option<&str>,
    json: bool,
    out: &mut dyn Write,
    start: Instant,
) -> Result<()> {
    if let Some(name) = tab {
        if !vault.catalog.is_pending() && vault.catalog.tab(name).is_none() {
            bail!(
                "No tab named '{}'. Available tabs: {}",
                name,
                vault.catalog.tabs().join(", ")
            );
        }
    }

    let prompts: Vec<&FlatPrompt> = match tab {
        Some(name) => vault.catalog.prompts_in_tab(name).collect(),
        None => vault.catalog.prompts().iter().collect(),
    };

    if json {
        serde_json::to_writer_pretty(&mut *out, &prompts)?;
        writeln!(out)?;
        return Ok(());
    }

    if vault.catalog.is_pending() {
        return write_pending_notice(out);
    }

    writeln!(
        out,
        "{} ({}ms)\n",
        format!("{} prompts", prompts.len()).green(),
        start.elapsed().as_millis()
    )?;
    write_catalog_prompts(vault, &prompts, out)
}

pub fn handle_find(
    vault: &Vault,
    query: &str,
    json: bool,
    out: &mut dyn Write,
    start: Instant,
) -> Result<()> {
    let results = vault.catalog.search(query);
    debug!(query = query, results = results.len(), "Search finished");

    if json {
        serde_json::to_writer_pretty(&mut *out, &results)?;
        writeln!(out)?;
        return Ok(());
    }

    if vault.catalog.is_pending() {
        return write_pending_notice(out);
    }

    if results.is_empty() {
        writeln!(out, "No prompts match '{}'", query.trim())?;
        return Ok(());
    }

    writeln!(
        out,
        "{} ({}ms)\n",
        format!("{} results", results.len()).green(),
        start.elapsed().as_millis()
    )?;
    write_catalog_prompts(vault, &results, out)
}

pub fn handle_show(vault: &Vault, id: &str, out: &mut dyn Write) -> Result<()> {
    let prompt = vault
        .lookup(id)
        .ok_or_else(|| anyhow!("No prompt with id '{}'", id))?;

    let marker = match prompt.origin {
        PromptOrigin::Catalog => favorite_marker(vault.favorites.is_favorite(prompt.id)),
        PromptOrigin::Custom => "✎".to_string(),
    };
    write_prompt(out, &prompt, &marker)
}

/// Copy a prompt's text. When stdout is not a terminal the text is written
/// there instead, so `pv copy <id> | ...` works.
pub fn handle_copy(
    vault: &Vault,
    id: &str,
    target: &mut dyn CopyTarget,
    is_tty: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let prompt = vault
        .lookup(id)
        .ok_or_else(|| anyhow!("No prompt with id '{}'", id))?;

    if !is_tty {
        write!(out, "{}", prompt.text)?;
        out.flush()?;
        return Ok(());
    }

    target
        .copy_text(prompt.text)
        .map_err(|e| anyhow!("Could not copy '{}': {}", id, e))?;
    writeln!(out, "{}", "Copied!".green())?;
    Ok(())
}

pub fn handle_id(
    tab: &str,
    section: &str,
    category: &str,
    text: &str,
    out: &mut dyn Write,
) -> Result<()> {
    writeln!(out, "{}", prompt_id(tab, section, category, text))?;
    Ok(())
}
