use anyhow::Result;
use clap::Parser;
use colored::*;
use is_terminal::IsTerminal;
use std::env;
use std::io::{self, Write};
use std::time::Instant;

use promptvault::cli::{Cli, Commands};
use promptvault::commands::{
    handle_config, handle_copy, handle_custom, handle_fav, handle_favs, handle_find, handle_id,
    handle_ls, handle_show, handle_tabs,
};
use promptvault::{init_logging, log_command_execution, Clipboard, LogConfig, Vault, VaultConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    let _ = dotenvy::dotenv();

    let start = Instant::now();
    let cli = Cli::parse();

    // Only initialize logging if explicitly requested via env var
    if env::var("PROMPTVAULT_LOG_LEVEL").is_ok() {
        init_logging(LogConfig::from_env())?;
    }

    let command_name = command_name(&cli.command);
    let result = run(cli.command, start).await;
    log_command_execution(command_name, start.elapsed().as_millis() as u64, &result);

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
    Ok(())
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Tabs => "tabs",
        Commands::Ls { .. } => "ls",
        Commands::Find { .. } => "find",
        Commands::Show { .. } => "show",
        Commands::Copy { .. } => "copy",
        Commands::Fav { .. } => "fav",
        Commands::Favs { .. } => "favs",
        Commands::Custom { .. } => "custom",
        Commands::Id { .. } => "id",
        Commands::Config { .. } => "config",
    }
}

async fn run(command: Commands, start: Instant) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Neither of these touches the vault
    match &command {
        Commands::Id {
            tab,
            section,
            category,
            text,
        } => return handle_id(tab, section, category, text, &mut out),
        Commands::Config { action } => {
            let config = VaultConfig::from_env()?;
            return handle_config(&config, action, &mut out);
        }
        _ => {}
    }

    let config = VaultConfig::from_env()?;
    let mut vault = Vault::open(&config).await;

    match command {
        Commands::Tabs => handle_tabs(&vault, &mut out)?,
        Commands::Ls { tab, json } => handle_ls(&vault, tab.as_deref(), json, &mut out, start)?,
        Commands::Find { query, json } => handle_find(&vault, &query, json, &mut out, start)?,
        Commands::Show { id } => handle_show(&vault, &id, &mut out)?,
        Commands::Copy { id } => {
            let mut clipboard = Clipboard::new();
            let is_tty = io::stdout().is_terminal();
            handle_copy(&vault, &id, &mut clipboard, is_tty, &mut out)?
        }
        Commands::Fav { id } => handle_fav(&mut vault, &id, &mut out)?,
        Commands::Favs { json } => handle_favs(&vault, json, &mut out)?,
        Commands::Custom { action } => handle_custom(&mut vault, &action, &mut out)?,
        Commands::Id { .. } | Commands::Config { .. } => {}
    }

    out.flush()?;
    Ok(())
}
