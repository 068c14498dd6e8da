//! Content type entity
//!
//! The semantic classification a buffer resolves to: a MIME type plus
//! informative metadata. Suffixes are never consulted during detection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A MIME type with an optional description and conventional suffixes
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentType {
    mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    suffixes: Vec<String>,
}

impl ContentType {
    /// Creates a content type with no description and no suffixes
    pub fn new(mime_type: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            description: None,
            suffixes: Vec::new(),
        }
    }

    /// Attaches a human-readable description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attaches conventional suffixes, stored lowercase without a leading dot
    pub fn with_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.suffixes = suffixes
            .into_iter()
            .map(|s| normalize_suffix(s.as_ref()))
            .collect();
        self
    }

    /// Returns the canonical mime type, e.g. `image/png`
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// Returns the description, if any
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the conventional suffixes in declaration order
    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    /// Returns the first declared suffix
    pub fn primary_suffix(&self) -> Option<&str> {
        self.suffixes.first().map(String::as_str)
    }

    /// Checks whether `suffix` is one of this type's suffixes.
    ///
    /// Comparison ignores case and a leading dot, so `".JPG"` matches `jpg`.
    pub fn supports_suffix(&self, suffix: &str) -> bool {
        let wanted = normalize_suffix(suffix);
        self.suffixes.iter().any(|s| *s == wanted)
    }

    /// Drops any parameters from the stored mime type
    pub(crate) fn normalized(mut self) -> Self {
        let trimmed = essence(&self.mime_type);
        if trimmed.len() != self.mime_type.len() {
            self.mime_type = trimmed.to_string();
        }
        self
    }

    /// Checks whether `mime` names this type, ignoring case and parameters
    pub fn is_mime_type(&self, mime: &str) -> bool {
        essence(mime).eq_ignore_ascii_case(&self.mime_type)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mime_type)
    }
}

impl From<&str> for ContentType {
    fn from(mime_type: &str) -> Self {
        Self::new(mime_type)
    }
}

impl From<String> for ContentType {
    fn from(mime_type: String) -> Self {
        Self::new(mime_type)
    }
}

/// Strips `;`-separated parameters and surrounding whitespace from a mime string
pub(crate) fn essence(mime: &str) -> &str {
    mime.split(';').next().unwrap_or_default().trim()
}

pub(crate) fn normalize_suffix(suffix: &str) -> String {
    suffix.trim().trim_start_matches('.').to_ascii_lowercase()
}
