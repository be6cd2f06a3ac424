//! Infrastructure adapters. Implement outbound ports.
//!
//! Hosted backend (REST + storage), in-memory stand-in, device media.
//! Map errors to DomainError.

pub mod backend;
pub mod media;
pub mod memory;
