//! Signature registry service
//!
//! Holds the immutable list of (signature, content type) associations the
//! matcher scans. Registries are assembled through [`RegistryBuilder`] and
//! expose no mutators once built, so they can be shared across threads
//! without synchronization.

use crate::domain::entities::{ContentType, FileSignature, Pattern, essence, normalize_suffix};
use crate::error::ConfigurationError;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::{debug, warn};

/// Upper bound on `offset + pattern.len()` for a registered signature.
///
/// Loaders read this many leading bytes at most.
pub const MAX_REQUIRED_LEN: usize = 1024 * 1024;

/// Index of a content type inside its registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentTypeId(usize);

impl ContentTypeId {
    /// Position of the content type in registration order
    pub fn index(self) -> usize {
        self.0
    }
}

/// A signature together with the content type it identifies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredSignature {
    signature: FileSignature,
    type_id: ContentTypeId,
}

impl RegisteredSignature {
    /// Returns the signature
    pub fn signature(&self) -> &FileSignature {
        &self.signature
    }

    /// Returns the identifier of the content type this signature resolves to
    pub fn type_id(&self) -> ContentTypeId {
        self.type_id
    }
}

/// Collects signatures and validates them before freezing a [`Registry`]
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    content_types: Vec<ContentType>,
    /// Lowercased mime type -> content type
    by_mime: HashMap<String, ContentTypeId>,
    signatures: Vec<RegisteredSignature>,
    /// (offset, pattern) -> owning content type, for duplicate detection
    seen: HashMap<(usize, Pattern), ContentTypeId>,
}

impl RegistryBuilder {
    /// Creates an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `signature` as a marker of `content_type`.
    ///
    /// A content type whose mime type is already known is merged with the
    /// existing entry if both carry the same metadata, or if the new one is
    /// bare (no description, no suffixes). Mime types compare case-insensitively.
    /// Registering the exact same signature twice for the same type is a
    /// no-op, provided the metadata agrees.
    ///
    /// Patterns made only of wildcards are refused: they would match every
    /// long enough buffer, so "unknown" could never be reported. This is a
    /// policy choice on top of the empty-pattern and duplicate rules.
    ///
    /// # Errors
    ///
    /// Fails when the pattern is empty or only wildcards, when it ends past
    /// [`MAX_REQUIRED_LEN`], when the mime type is blank or conflicts with
    /// earlier metadata, and when the same `(offset, pattern)` is already
    /// registered for a different type.
    pub fn register(
        &mut self,
        signature: FileSignature,
        content_type: impl Into<ContentType>,
    ) -> Result<&mut Self, ConfigurationError> {
        let content_type = content_type.into().normalized();
        let result = self.try_register(signature, content_type);
        if let Err(err) = &result {
            warn!("Rejected signature registration: {err}");
        }
        result.map(|()| self)
    }

    fn try_register(
        &mut self,
        signature: FileSignature,
        content_type: ContentType,
    ) -> Result<(), ConfigurationError> {
        let mime = essence(content_type.mime_type());
        if mime.is_empty() {
            return Err(ConfigurationError::BlankMimeType);
        }
        if signature.pattern().is_empty() {
            return Err(ConfigurationError::EmptyPattern {
                mime_type: mime.to_string(),
                offset: signature.offset(),
            });
        }
        if signature.specificity() == 0 {
            return Err(ConfigurationError::WildcardOnlyPattern {
                mime_type: mime.to_string(),
                offset: signature.offset(),
            });
        }

        if signature.required_len() > MAX_REQUIRED_LEN {
            return Err(ConfigurationError::OffsetTooLarge {
                mime_type: mime.to_string(),
                offset: signature.offset(),
                limit: MAX_REQUIRED_LEN,
            });
        }

        let key = (signature.offset(), signature.pattern().clone());
        let duplicate = self.seen.get(&key).copied();
        if let Some(existing) = duplicate {
            let existing_type = &self.content_types[existing.0];
            if !existing_type.is_mime_type(mime) {
                return Err(ConfigurationError::DuplicateSignature {
                    offset: signature.offset(),
                    existing: existing_type.mime_type().to_string(),
                    conflicting: mime.to_string(),
                });
            }
        }

        let type_id = self.intern(content_type)?;
        if duplicate.is_some() {
            debug!("Ignoring duplicate signature {signature}");
            return Ok(());
        }
        self.seen.insert(key, type_id);
        self.signatures.push(RegisteredSignature { signature, type_id });
        Ok(())
    }

    fn intern(&mut self, content_type: ContentType) -> Result<ContentTypeId, ConfigurationError> {
        let key = essence(content_type.mime_type()).to_ascii_lowercase();
        match self.by_mime.entry(key) {
            Entry::Occupied(slot) => {
                let id = *slot.get();
                let existing = &self.content_types[id.0];
                let bare = content_type.description().is_none() && content_type.suffixes().is_empty();
                let same_metadata = existing.description() == content_type.description()
                    && existing.suffixes() == content_type.suffixes();
                if bare || same_metadata {
                    Ok(id)
                } else {
                    Err(ConfigurationError::ConflictingContentType(
                        existing.mime_type().to_string(),
                    ))
                }
            }
            Entry::Vacant(slot) => {
                let id = ContentTypeId(self.content_types.len());
                slot.insert(id);
                self.content_types.push(content_type);
                Ok(id)
            }
        }
    }

    /// Freezes the collected signatures into an immutable registry
    pub fn build(self) -> Registry {
        let required_len = self
            .signatures
            .iter()
            .map(|entry| entry.signature.required_len())
            .max()
            .unwrap_or(0);

        debug!(
            "Built signature registry: {} signatures, {} content types, {} bytes required",
            self.signatures.len(),
            self.content_types.len(),
            required_len
        );

        Registry {
            content_types: self.content_types,
            by_mime: self.by_mime,
            signatures: self.signatures,
            required_len,
        }
    }
}

/// Immutable registry of file signatures for content type detection
///
/// # Example
///
/// ```
/// use magicid::domain::entities::{ContentType, Pattern};
/// use magicid::domain::services::Registry;
///
/// let registry = Registry::build([
///     (0, Pattern::exact(&[0x1F, 0x8B]), ContentType::new("application/gzip")),
///     (0, Pattern::exact(b"%PDF"), ContentType::new("application/pdf")),
/// ])
/// .unwrap();
/// assert_eq!(registry.signature_count(), 2);
/// assert_eq!(registry.required_len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    content_types: Vec<ContentType>,
    by_mime: HashMap<String, ContentTypeId>,
    signatures: Vec<RegisteredSignature>,
    required_len: usize,
}

impl Registry {
    /// Starts an empty builder
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Builds a registry from `(offset, pattern, content type)` entries in order
    pub fn build<I, P, C>(entries: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (usize, P, C)>,
        P: Into<Pattern>,
        C: Into<ContentType>,
    {
        let mut builder = RegistryBuilder::new();
        for (offset, pattern, content_type) in entries {
            builder.register(FileSignature::new(pattern).with_offset(offset), content_type)?;
        }
        Ok(builder.build())
    }

    /// Returns every registered signature in insertion order.
    ///
    /// The iterator is cheap to clone, so it can be restarted at will.
    pub fn all_signatures(&self) -> std::slice::Iter<'_, RegisteredSignature> {
        self.signatures.iter()
    }

    /// Resolves a content type identifier
    pub fn content_type(&self, id: ContentTypeId) -> Option<&ContentType> {
        self.content_types.get(id.0)
    }

    /// Returns all content types in registration order
    pub fn content_types(&self) -> &[ContentType] {
        &self.content_types
    }

    /// Looks up a content type by mime type, ignoring case and parameters
    pub fn find_by_mime_type(&self, mime: &str) -> Option<&ContentType> {
        self.by_mime
            .get(&essence(mime).to_ascii_lowercase())
            .and_then(|&id| self.content_type(id))
    }

    /// Returns every content type that lists `suffix`
    pub fn find_by_suffix(&self, suffix: &str) -> Vec<&ContentType> {
        let suffix = normalize_suffix(suffix);
        if suffix.is_empty() {
            return Vec::new();
        }
        self.content_types
            .iter()
            .filter(|ct| ct.supports_suffix(&suffix))
            .collect()
    }

    /// Number of leading bytes a loader must supply for every signature to be testable
    pub fn required_len(&self) -> usize {
        self.required_len
    }

    /// Returns the number of registered signatures
    pub fn signature_count(&self) -> usize {
        self.signatures.len()
    }

    /// Returns the number of registered content types
    pub fn type_count(&self) -> usize {
        self.content_types.len()
    }

    /// Returns true when nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
