//! Domain layer - Core detection logic
//!
//! This module contains the domain entities and the registry/matcher
//! services. It performs no I/O.

pub mod entities;
pub mod services;
