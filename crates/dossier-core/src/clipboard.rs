//! In-process clipboard for copy operations.

use std::collections::HashMap;

/// Clipboard data format.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClipboardFormat {
    /// Plain text.
    Text,
    /// HTML content.
    Html,
}

/// Data stored in the clipboard, keyed by format.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardData {
    formats: HashMap<ClipboardFormat, String>,
}

impl ClipboardData {
    /// Create empty clipboard data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard data with plain text.
    #[must_use]
    pub fn text(content: &str) -> Self {
        let mut data = Self::new();
        data.formats.insert(ClipboardFormat::Text, content.to_string());
        data
    }

    /// Add an HTML rendition alongside the text.
    #[must_use]
    pub fn with_html(mut self, content: &str) -> Self {
        self.formats.insert(ClipboardFormat::Html, content.to_string());
        self
    }

    /// Get content for a format.
    #[must_use]
    pub fn get(&self, format: &ClipboardFormat) -> Option<&str> {
        self.formats.get(format).map(String::as_str)
    }

    /// Whether no formats are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

/// In-memory clipboard.
#[derive(Debug, Default)]
pub struct Clipboard {
    data: ClipboardData,
}

impl Clipboard {
    /// Create an empty clipboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the clipboard contents.
    pub fn write(&mut self, data: ClipboardData) {
        self.data = data;
    }

    /// Current plain-text contents.
    #[must_use]
    pub fn read_text(&self) -> Option<&str> {
        self.data.get(&ClipboardFormat::Text)
    }

    /// Current contents in every format.
    #[must_use]
    pub const fn read(&self) -> &ClipboardData {
        &self.data
    }
}
