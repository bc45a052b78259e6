// Custom prompt commands: add, ls, rm

use anyhow::Result;
use chrono::{Local, TimeZone};
use colored::*;
use std::io::Write;

use super::write_prompt;
use crate::cli::CustomCommands;
use crate::custom::NewPrompt;
use crate::logging::log_store_operation;
use crate::vault::{PromptOrigin, PromptRef, Vault};

pub fn handle_custom(vault: &mut Vault, action: &CustomCommands, out: &mut dyn Write) -> Result<()> {
    match action {
        CustomCommands::Add {
            tab,
            section,
            category,
            text,
        } => handle_add(vault, NewPrompt::new(tab, section, category, text), out),
        CustomCommands::Ls { json } => handle_list(vault, *json, out),
        CustomCommands::Rm { id } => handle_remove(vault, id, out),
    }
}

fn handle_add(vault: &mut Vault, fields: NewPrompt, out: &mut dyn Write) -> Result<()> {
    let (prompt, status) = vault.custom.add(fields);
    log_store_operation("custom", "add", Some(prompt.id.as_str()), &status);

    writeln!(out, "✓ Added {}", prompt.id.bold())?;
    Ok(())
}

fn handle_list(vault: &Vault, json: bool, out: &mut dyn Write) -> Result<()> {
    let prompts = vault.custom.prompts();

    if json {
        serde_json::to_writer_pretty(&mut *out, prompts)?;
        writeln!(out)?;
        return Ok(());
    }

    if prompts.is_empty() {
        writeln!(
            out,
            "No custom prompts yet. Add one with: {}",
            "pv custom add --tab <TAB> --section <SECTION> --category <CATEGORY> <TEXT>".bold()
        )?;
        return Ok(());
    }

    for prompt in prompts {
        let created = Local
            .timestamp_millis_opt(prompt.created_at)
            .single()
            .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();

        let entry = PromptRef {
            id: &prompt.id,
            tab: &prompt.tab,
            section: &prompt.section,
            category: &prompt.category,
            text: &prompt.text,
            origin: PromptOrigin::Custom,
        };
        write_prompt(out, &entry, "✎")?;
        writeln!(out, "    {}", created.dimmed())?;
    }
    Ok(())
}

fn handle_remove(vault: &mut Vault, id: &str, out: &mut dyn Write) -> Result<()> {
    let existed = vault.custom.contains(id);
    let status = vault.custom.remove(id);
    log_store_operation("custom", "remove", Some(id), &status);

    if existed {
        writeln!(out, "✓ Deleted {}", id.bold())?;
    } else {
        writeln!(out, "Nothing to delete: no custom prompt '{}'", id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{output, sample_vault};
    use crate::custom::CustomPrompt;

    fn add(vault: &mut Vault, text: &str) -> String {
        let action = CustomCommands::Add {
            tab: "X".to_string(),
            section: "Y".to_string(),
            category: "Z".to_string(),
            text: text.to_string(),
        };
        let mut buf = Vec::new();
        handle_custom(vault, &action, &mut buf).unwrap();
        output(buf)
    }

    #[test]
    fn test_add_list_remove() {
        let mut vault = sample_vault();
        let added = add(&mut vault, "hi");
        assert!(added.contains("Added") && added.contains("c1"));
        add(&mut vault, "there");

        let mut buf = Vec::new();
        handle_custom(&mut vault, &CustomCommands::Ls { json: true }, &mut buf).unwrap();
        let listed: Vec<CustomPrompt> = serde_json::from_slice(&buf).unwrap();
        let texts: Vec<&str> = listed.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["hi", "there"]);

        let mut buf = Vec::new();
        let remove = CustomCommands::Rm { id: "c1".to_string() };
        handle_custom(&mut vault, &remove, &mut buf).unwrap();
        assert!(output(buf).contains("Deleted"));
        assert!(!vault.custom.contains("c1"));
        assert!(vault.custom.contains("c2"));
    }

    #[test]
    fn test_remove_unknown_is_not_an_error() {
        let mut vault = sample_vault();
        let mut buf = Vec::new();
        let remove = CustomCommands::Rm { id: "c42".to_string() };
        handle_custom(&mut vault, &remove, &mut buf).unwrap();
        assert!(output(buf).contains("Nothing to delete"));
    }

    #[test]
    fn test_text_listing() {
        let mut vault = sample_vault();
        let mut buf = Vec::new();
        handle_custom(&mut vault, &CustomCommands::Ls { json: false }, &mut buf).unwrap();
        assert!(output(buf).contains("No custom prompts yet"));

        add(&mut vault, "Write a limerick");
        let mut buf = Vec::new();
        handle_custom(&mut vault, &CustomCommands::Ls { json: false }, &mut buf).unwrap();
        let text = output(buf);
        assert!(text.contains("X / Y / Z"));
        assert!(text.contains("    Write a limerick"));
    }
}
