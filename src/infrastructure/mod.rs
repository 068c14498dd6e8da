//! Infrastructure layer
//!
//! Signature data and byte loading around the domain services. This layer
//! holds the file system access and the configuration formats.

pub mod loader;
pub mod signatures;
