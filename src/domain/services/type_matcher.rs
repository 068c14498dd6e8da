//! Type matcher service
//!
//! Scans a registry against a fully loaded buffer and resolves the single
//! best content type. Matching is a pure function of (registry, buffer).

use crate::domain::entities::ContentType;
use crate::domain::services::{RegisteredSignature, Registry};
use rayon::prelude::*;
use tracing::trace;

/// Identifies buffers against an owned [`Registry`]
///
/// # Example
///
/// ```
/// use magicid::domain::services::Matcher;
///
/// let matcher = Matcher::with_default_catalogue().unwrap();
/// let found = matcher.identify(b"%PDF-1.4");
/// assert_eq!(found.map(|ct| ct.mime_type()), Some("application/pdf"));
/// assert!(matcher.identify(&[]).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Matcher {
    registry: Registry,
}

impl Matcher {
    /// Creates a matcher over `registry`
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    /// Returns the registry this matcher scans
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Number of leading bytes worth loading before calling [`identify`](Self::identify)
    pub fn required_len(&self) -> usize {
        self.registry.required_len()
    }

    /// Determines the content type of `data`.
    ///
    /// Among all matching signatures the one with the most non-wildcard
    /// bytes wins, then the longer pattern, then the one registered first.
    /// Returns `None` for empty buffers and unrecognized content.
    pub fn identify(&self, data: &[u8]) -> Option<&ContentType> {
        if data.is_empty() {
            return None;
        }

        let mut best: Option<&RegisteredSignature> = None;
        for candidate in self.registry.all_signatures() {
            if !candidate.signature().matches(data) {
                continue;
            }
            trace!("Signature {} matched", candidate.signature());
            best = match best {
                Some(current) if !outranks(candidate, current) => Some(current),
                _ => Some(candidate),
            };
        }

        let content_type = best.and_then(|entry| self.registry.content_type(entry.type_id()));
        trace!(
            "Identified {} bytes as {}",
            data.len(),
            content_type.map_or("unknown", ContentType::mime_type)
        );
        content_type
    }

    /// Identifies many buffers in parallel, preserving input order
    pub fn identify_batch<B>(&self, buffers: &[B]) -> Vec<Option<&ContentType>>
    where
        B: AsRef<[u8]> + Sync,
    {
        buffers
            .par_iter()
            .map(|buffer| self.identify(buffer.as_ref()))
            .collect()
    }
}

/// Strict ranking: ties keep the earlier registration
fn outranks(candidate: &RegisteredSignature, current: &RegisteredSignature) -> bool {
    let rank = |entry: &RegisteredSignature| {
        (
            entry.signature().specificity(),
            entry.signature().pattern().len(),
        )
    };
    rank(candidate) > rank(current)
}
