//! Domain entities
//!
//! Core objects of content detection: signatures and the content types
//! they resolve to.

mod content_type;
mod file_signature;

pub use content_type::ContentType;
pub(crate) use content_type::{essence, normalize_suffix};
pub use file_signature::{ByteMatcher, FileSignature, Pattern};
