//! Vault configuration
//!
//! Settings come from `config.toml` in the data directory, with environment
//! variables taking precedence:
//!
//! - `PROMPTVAULT_DIR`: data directory (default `~/.promptvault`)
//! - `PROMPTVAULT_SOURCE`: prompt document path or URL
//!   (default `<data dir>/prompts.json`)

use anyhow::{Context, Result};
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::source::DocumentSource;
use crate::storage::FileStore;

pub const CONFIG_FILE: &str = "config.toml";
pub const DEFAULT_DOCUMENT: &str = "prompts.json";

/// On-disk shape of `config.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub vault: VaultSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VaultSection {
    /// Prompt document path or URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct VaultConfig {
    pub data_dir: PathBuf,
    pub source: DocumentSource,
}

impl VaultConfig {
    /// Resolve configuration from the environment and the config file.
    pub fn from_env() -> Result<Self> {
        let data_dir = match env::var("PROMPTVAULT_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => home_dir()
                .context("Could not find home directory")?
                .join(".promptvault"),
        };
        let source_override = env::var("PROMPTVAULT_SOURCE").ok();

        Self::resolve(data_dir, source_override.as_deref())
    }

    /// Resolve configuration for `data_dir`, optionally forcing the source.
    pub fn resolve(data_dir: PathBuf, source_override: Option<&str>) -> Result<Self> {
        let file = load_config_file(&data_dir.join(CONFIG_FILE))?;

        let source = match source_override.or(file.vault.source.as_deref()) {
            Some(raw) => match raw.parse::<DocumentSource>() {
                Ok(source) => source,
                Err(never) => match never {},
            },
            None => DocumentSource::File(data_dir.join(DEFAULT_DOCUMENT)),
        };

        Ok(Self { data_dir, source })
    }

    pub fn config_path(&self) -> PathBuf {
        self.data_dir.join(CONFIG_FILE)
    }

    /// File storage for the favorites and custom prompt stores.
    pub fn storage(&self) -> FileStore {
        FileStore::new(&self.data_dir)
    }
}

/// Read `config.toml`. A missing file yields the defaults.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
}

/// Write `config.toml`, creating the directory if needed.
pub fn save_config_file(path: &Path, config: &ConfigFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(path, content).with_context(|| format!("Failed to write config file: {:?}", path))
}
