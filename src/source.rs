//! One-shot loading of the taxonomy document
//!
//! The document comes from a local JSON file or, with the `remote` feature,
//! an HTTP(S) URL. Loading never fails loudly: any problem is logged and the
//! caller gets `None`, leaving the catalog pending.

use anyhow::{Context, Result};
use std::convert::Infallible;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

use crate::catalog::{parse_document, Document};

/// Where the taxonomy document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    File(PathBuf),
    Url(String),
}

impl FromStr for DocumentSource {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(DocumentSource::Url(s.to_string()))
        } else {
            let expanded = match s.strip_prefix("~/") {
                Some(rest) => dirs::home_dir()
                    .map(|home| home.join(rest))
                    .unwrap_or_else(|| PathBuf::from(s)),
                None => PathBuf::from(s),
            };
            Ok(DocumentSource::File(expanded))
        }
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::File(path) => write!(f, "{}", path.display()),
            DocumentSource::Url(url) => write!(f, "{}", url),
        }
    }
}

/// Load the document once. Failures are logged and yield `None`.
pub async fn load_document(source: &DocumentSource) -> Option<Document> {
    let result = match source {
        DocumentSource::File(path) => read_file(path),
        DocumentSource::Url(url) => fetch_remote(url).await,
    };

    match result {
        Ok(document) => {
            debug!(source = %source, tabs = document.len(), "Prompt document loaded");
            Some(document)
        }
        Err(e) => {
            warn!(source = %source, error = %format!("{:#}", e), "Prompt document unavailable");
            None
        }
    }
}

fn read_file(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read prompt document: {:?}", path))?;
    parse_document(&content).context("Failed to parse prompt document")
}

#[cfg(feature = "remote")]
async fn fetch_remote(url: &str) -> Result<Document> {
    use std::time::Duration;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("Failed to create HTTP client")?;

    let response = client
        .get(url)
        .send()
        .await
        .context("Failed to fetch prompt document")?;

    if !response.status().is_success() {
        anyhow::bail!("Prompt document request failed with status {}", response.status());
    }

    let body = response
        .text()
        .await
        .context("Failed to read prompt document body")?;
    parse_document(&body).context("Failed to parse prompt document")
}

#[cfg(not(feature = "remote"))]
async fn fetch_remote(url: &str) -> Result<Document> {
    anyhow::bail!("Cannot fetch {}: built without the `remote` feature", url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_source_parsing() {
        assert_eq!(
            "https://example.com/prompts.json".parse::<DocumentSource>().unwrap(),
            DocumentSource::Url("https://example.com/prompts.json".to_string())
        );
        assert_eq!(
            "  /srv/prompts.json ".parse::<DocumentSource>().unwrap(),
            DocumentSource::File(PathBuf::from("/srv/prompts.json"))
        );
        assert!(matches!(
            "prompts.json".parse::<DocumentSource>().unwrap(),
            DocumentSource::File(_)
        ));
    }

    #[tokio::test]
    async fn test_loads_file_document() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prompts.json");
        fs::write(
            &path,
            r#"[{"tab": "Work", "sections": [{"section": "Email", "categories": [
                {"category": "Reply", "prompts": ["Say Thanks"]}]}]}]"#,
        )
        .unwrap();

        let document = load_document(&DocumentSource::File(path)).await.unwrap();
        assert_eq!(document.len(), 1);
        assert_eq!(document[0].sections[0].categories[0].prompts, vec!["Say Thanks"]);
    }

    #[tokio::test]
    async fn test_missing_file_degrades_to_none() {
        let temp_dir = TempDir::new().unwrap();
        let source = DocumentSource::File(temp_dir.path().join("nope.json"));
        assert!(load_document(&source).await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_file_degrades_to_none() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("prompts.json");
        fs::write(&path, r#"{"tab": "not a list"}"#).unwrap();

        assert!(load_document(&DocumentSource::File(path)).await.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_url_degrades_to_none() {
        let source = DocumentSource::Url("http://127.0.0.1:9/prompts.json".to_string());
        assert!(load_document(&source).await.is_none());
    }
}
