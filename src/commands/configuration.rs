// Configuration commands: show, set-source

use anyhow::Result;
use colored::*;
use std::io::Write;

use crate::cli::ConfigCommands;
use crate::config::{load_config_file, save_config_file, VaultConfig};
use crate::custom::CUSTOM_KEY;
use crate::favorites::FAVORITES_KEY;
use crate::source::DocumentSource;

pub fn handle_config(config: &VaultConfig, action: &ConfigCommands, out: &mut dyn Write) -> Result<()> {
    match action {
        ConfigCommands::Show => show_configuration(config, out),
        ConfigCommands::SetSource { source } => set_source(config, source, out),
    }
}

fn show_configuration(config: &VaultConfig, out: &mut dyn Write) -> Result<()> {
    let storage = config.storage();

    writeln!(out, "📁 Data directory: {}", config.data_dir.display().to_string().cyan())?;
    writeln!(out, "⚙️  Config file:    {}", config.config_path().display())?;

    let kind = match config.source {
        DocumentSource::File(_) => "file",
        DocumentSource::Url(_) => "url",
    };
    writeln!(out, "📚 Prompt library: {} ({})", config.source.to_string().cyan(), kind)?;
    writeln!(out, "⭐ Favorites:      {}", storage.key_path(FAVORITES_KEY).display())?;
    writeln!(out, "✎  Custom prompts: {}", storage.key_path(CUSTOM_KEY).display())?;
    Ok(())
}

fn set_source(config: &VaultConfig, source: &str, out: &mut dyn Write) -> Result<()> {
    let path = config.config_path();
    let mut file = load_config_file(&path)?;
    file.vault.source = Some(source.trim().to_string());
    save_config_file(&path, &file)?;

    writeln!(out, "✓ Prompt library source set to '{}'", source.trim().green())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::output;
    use tempfile::TempDir;

    #[test]
    fn test_set_source_persists() {
        let temp_dir = TempDir::new().unwrap();
        let config = VaultConfig::resolve(temp_dir.path().to_path_buf(), None).unwrap();

        let mut buf = Vec::new();
        let action = ConfigCommands::SetSource {
            source: "https://example.com/prompts.json".to_string(),
        };
        handle_config(&config, &action, &mut buf).unwrap();

        let reloaded = VaultConfig::resolve(temp_dir.path().to_path_buf(), None).unwrap();
        assert_eq!(
            reloaded.source,
            DocumentSource::Url("https://example.com/prompts.json".to_string())
        );
    }

    #[test]
    fn test_show_lists_paths() {
        let temp_dir = TempDir::new().unwrap();
        let config = VaultConfig::resolve(temp_dir.path().to_path_buf(), None).unwrap();

        let mut buf = Vec::new();
        handle_config(&config, &ConfigCommands::Show, &mut buf).unwrap();
        let text = output(buf);
        assert!(text.contains("pv_favorites.json"));
        assert!(text.contains("pv_custom.json"));
        assert!(text.contains("(file)"));
    }
}
