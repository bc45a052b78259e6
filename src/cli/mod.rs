//! Command-line interface definitions and parsing
//!
//! Defines the CLI structure using Clap: catalog browsing, search, favorites,
//! custom prompts and configuration.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pv")]
#[command(version)]
#[command(about = "PromptVault - your personal prompt library")]
#[command(after_help = "EXAMPLES:
  pv find \"reply\"                     # Search across tabs, sections, categories and text
  pv copy pm7bp76                     # Copy a prompt to the clipboard
  pv fav pm7bp76                      # Toggle a favorite
  pv custom add --tab Work --section Email --category Reply \"Thank them warmly\"

Prompt ids starting with 'p' come from the library; ids starting with 'c' are your own.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the library's tabs
    Tabs,
    /// List library prompts
    #[command(alias = "l", alias = "list")]
    Ls {
        /// Only prompts from this tab
        #[arg(short = 't', long = "tab")]
        tab: Option<String>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Search prompts by text, category, tab or section
    #[command(alias = "f", alias = "search")]
    Find {
        /// Case-insensitive substring to look for
        query: String,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Display a prompt
    #[command(alias = "s")]
    Show {
        /// Prompt id
        id: String,
    },
    /// Copy a prompt's text to the clipboard
    #[command(alias = "c")]
    Copy {
        /// Prompt id
        id: String,
    },
    /// Toggle a library prompt as favorite
    Fav {
        /// Prompt id
        id: String,
    },
    /// List favorite prompts
    Favs {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Manage your own prompts
    Custom {
        #[command(subcommand)]
        action: CustomCommands,
    },
    /// Print the id a prompt would get in the library
    Id {
        tab: String,
        section: String,
        category: String,
        text: String,
    },
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub enum CustomCommands {
    /// Add a prompt
    #[command(alias = "new")]
    Add {
        #[arg(long)]
        tab: String,
        #[arg(long)]
        section: String,
        #[arg(long)]
        category: String,
        /// Prompt text
        text: String,
    },
    /// List your prompts, oldest first
    #[command(alias = "list")]
    Ls {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Delete a prompt
    #[command(alias = "delete", alias = "remove")]
    Rm {
        /// Prompt id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show resolved paths and the document source
    Show,
    /// Store the document source (path or URL) in config.toml
    SetSource { source: String },
}
