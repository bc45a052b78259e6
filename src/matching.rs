//! Substring search over the flat prompt catalog
//!
//! Matching is plain case-insensitive containment: no tokenizing, no scoring.
//! A prompt matches when the query occurs in its text, category, tab or
//! section. Results keep catalog order.

use crate::catalog::FlatPrompt;

/// A prepared search query
///
/// The query is trimmed and lowercased once, then tested against any number
/// of records.
#[derive(Debug, Clone)]
pub struct Matcher {
    needle: Option<String>,
}

impl Matcher {
    /// Prepare `query` for matching. A blank query matches everything.
    pub fn new(query: &str) -> Self {
        let trimmed = query.trim();
        let needle = (!trimmed.is_empty()).then(|| trimmed.to_lowercase());
        Self { needle }
    }

    /// Whether this query filters anything at all.
    pub fn is_active(&self) -> bool {
        self.needle.is_some()
    }

    pub fn is_match(&self, prompt: &FlatPrompt) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };

        [&prompt.text, &prompt.category, &prompt.tab, &prompt.section]
            .iter()
            .any(|field| field.to_lowercase().contains(needle.as_str()))
    }

    /// Keep matching records, in their original relative order.
    pub fn filter<'a>(&self, prompts: &'a [FlatPrompt]) -> Vec<&'a FlatPrompt> {
        prompts.iter().filter(|prompt| self.is_match(prompt)).collect()
    }
}

/// Filter `prompts` by `query` in one pass.
pub fn filter<'a>(prompts: &'a [FlatPrompt], query: &str) -> Vec<&'a FlatPrompt> {
    Matcher::new(query).filter(prompts)
}
