//! Utility functions shared across the application.
//!
//! - [`base62`] - Positional base-62 encoding of numeric link ids
//! - [`client_ip`] - Client IP extraction from headers and connect info

pub mod base62;
pub mod client_ip;
