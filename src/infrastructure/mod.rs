//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for persistence, caching, throttling and event
//! transport.
//!
//! # Modules
//!
//! - [`cache`] - Caching abstractions (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`rate_limit`] - Distributed fixed-window-with-block throttling
//! - [`events`] - Channel-backed analytics publisher

pub mod cache;
pub mod events;
pub mod persistence;
pub mod rate_limit;
