//! Content-based file type detection.
//!
//! A [`Registry`] of magic-byte signatures is built once, then a
//! [`Matcher`] resolves buffers to a single [`ContentType`] or `None`.
//!
//! ```
//! use magicid::{FileType, Matcher};
//!
//! let matcher = Matcher::with_default_catalogue()?;
//! let found = matcher.identify(&[0xCA, 0xFE, 0xBA, 0xBE, 0x00, 0x00, 0x00, 0x34]);
//! assert_eq!(found.and_then(FileType::from_content_type), Some(FileType::JavaClass));
//! # Ok::<(), magicid::ConfigurationError>(())
//! ```

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use domain::entities::{ByteMatcher, ContentType, FileSignature, Pattern};
pub use domain::services::{
    ContentTypeId, MAX_REQUIRED_LEN, Matcher, RegisteredSignature, Registry, RegistryBuilder,
};
pub use error::{ConfigurationError, IdentifyError};
pub use infrastructure::loader::load_fragment;
pub use infrastructure::signatures::table::SignatureTable;
pub use infrastructure::signatures::{FileType, default_registry};
