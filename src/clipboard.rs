//! System clipboard integration
//!
//! Copying prompt text is the one boundary operation whose failure the user
//! must see, so errors here are returned instead of swallowed.

use copypasta::{ClipboardContext, ClipboardProvider};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard is not available on this system")]
    Unavailable,
    #[error("failed to copy to clipboard: {0}")]
    Write(String),
}

/// Anything text can be copied into
pub trait CopyTarget {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

pub struct Clipboard {
    context: Option<ClipboardContext>,
}

impl Default for Clipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipboard {
    pub fn new() -> Self {
        // Headless sessions have no clipboard; that only fails at copy time
        let context = ClipboardContext::new().ok();
        Self { context }
    }

    pub fn is_available(&self) -> bool {
        self.context.is_some()
    }
}

impl CopyTarget for Clipboard {
    fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let ctx = self.context.as_mut().ok_or(ClipboardError::Unavailable)?;
        ctx.set_contents(text.to_string())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Clipboard stand-in that records copies, or refuses them.
    #[derive(Default)]
    pub(crate) struct RecordingClipboard {
        pub copied: Vec<String>,
        pub broken: bool,
    }

    impl CopyTarget for RecordingClipboard {
        fn copy_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.broken {
                return Err(ClipboardError::Unavailable);
            }
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_clipboard_creation() {
        // Must not panic on machines without a clipboard
        let clipboard = Clipboard::new();
        let _ = clipboard.is_available();
    }

    #[test]
    fn test_missing_clipboard_is_an_error() {
        let mut clipboard = Clipboard { context: None };
        assert!(matches!(
            clipboard.copy_text("hello"),
            Err(ClipboardError::Unavailable)
        ));
    }
}
