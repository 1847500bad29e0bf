//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository
//! calls, validation, and business rules. Services consume domain traits and
//! provide a clean API for HTTP handlers and background tasks.
//!
//! # Available Services
//!
//! - [`services::CodeGenerator`] - Sharded unique short code generation
//! - [`services::LinkService`] - Link creation and cache-aside resolution
//! - [`services::ExpiryReaper`] - Periodic expired link sweep

pub mod services;
