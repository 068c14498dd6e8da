//! File signature entity
//!
//! Represents the magic bytes that identify a specific content type,
//! optionally anchored at a non-zero offset and optionally containing
//! wildcard positions.

use crate::error::ConfigurationError;
use std::fmt;
use std::str::FromStr;

/// A single position in a signature pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteMatcher {
    /// Matches exactly this byte value
    Exact(u8),
    /// Matches any byte value
    Any,
}

impl ByteMatcher {
    /// Checks whether `byte` satisfies this matcher
    #[inline]
    pub fn matches(self, byte: u8) -> bool {
        match self {
            ByteMatcher::Exact(expected) => expected == byte,
            ByteMatcher::Any => true,
        }
    }

    /// Returns true for wildcard positions
    pub fn is_wildcard(self) -> bool {
        matches!(self, ByteMatcher::Any)
    }
}

impl From<u8> for ByteMatcher {
    fn from(byte: u8) -> Self {
        ByteMatcher::Exact(byte)
    }
}

/// An ordered sequence of byte matchers
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Pattern(Vec<ByteMatcher>);

impl Pattern {
    /// Creates a pattern from explicit matchers
    pub fn new(matchers: Vec<ByteMatcher>) -> Self {
        Self(matchers)
    }

    /// Creates a pattern made only of exact bytes
    pub fn exact(bytes: &[u8]) -> Self {
        Self(bytes.iter().copied().map(ByteMatcher::Exact).collect())
    }

    /// Returns the matchers
    pub fn matchers(&self) -> &[ByteMatcher] {
        &self.0
    }

    /// Returns the pattern length, wildcards included
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the pattern has no positions
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of non-wildcard positions
    pub fn specificity(&self) -> usize {
        self.0.iter().filter(|m| !m.is_wildcard()).count()
    }

    /// Checks `window` position by position; lengths must agree
    #[inline]
    pub fn matches(&self, window: &[u8]) -> bool {
        window.len() == self.0.len()
            && self
                .0
                .iter()
                .zip(window)
                .all(|(matcher, &byte)| matcher.matches(byte))
    }
}

impl From<&[u8]> for Pattern {
    fn from(bytes: &[u8]) -> Self {
        Self::exact(bytes)
    }
}

impl<const N: usize> From<[u8; N]> for Pattern {
    fn from(bytes: [u8; N]) -> Self {
        Self::exact(&bytes)
    }
}

/// Parses space separated hex pairs, `??` marking a wildcard: `"47 49 ?? 38"`
impl FromStr for Pattern {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(|token| {
                if token == "??" {
                    return Ok(ByteMatcher::Any);
                }
                let mut byte = [0u8; 1];
                hex::decode_to_slice(token, &mut byte).map_err(|err| {
                    ConfigurationError::InvalidPattern {
                        token: token.to_string(),
                        message: err.to_string(),
                    }
                })?;
                Ok(ByteMatcher::Exact(byte[0]))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Pattern)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, matcher) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match matcher {
                ByteMatcher::Exact(byte) => write!(f, "{byte:02X}")?,
                ByteMatcher::Any => f.write_str("??")?,
            }
        }
        Ok(())
    }
}

/// Magic bytes expected at a fixed offset of a buffer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileSignature {
    /// Bytes to compare, wildcards included
    pattern: Pattern,
    /// Offset from the start where the pattern must begin (usually 0)
    offset: usize,
}

impl FileSignature {
    /// Creates a signature anchored at offset 0
    pub fn new(pattern: impl Into<Pattern>) -> Self {
        Self {
            pattern: pattern.into(),
            offset: 0,
        }
    }

    /// Anchors the signature at a custom offset
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Returns the pattern
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Returns the offset
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of non-wildcard bytes, used to rank overlapping matches
    pub fn specificity(&self) -> usize {
        self.pattern.specificity()
    }

    /// Minimum buffer length needed before this signature can match
    pub fn required_len(&self) -> usize {
        self.offset.saturating_add(self.pattern.len())
    }

    /// Checks if `data` carries this signature.
    ///
    /// Buffers shorter than [`required_len`](Self::required_len) never match.
    pub fn matches(&self, data: &[u8]) -> bool {
        if self.pattern.is_empty() || data.len() < self.required_len() {
            return false;
        }
        self.pattern.matches(&data[self.offset..self.required_len()])
    }
}

impl fmt::Display for FileSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] @ {}", self.pattern, self.offset)
    }
}
