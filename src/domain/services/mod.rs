//! Domain services
//!
//! The immutable signature registry and the matcher that queries it.

mod signature_registry;
mod type_matcher;

pub use signature_registry::{
    ContentTypeId, MAX_REQUIRED_LEN, RegisteredSignature, Registry, RegistryBuilder,
};
pub use type_matcher::Matcher;
