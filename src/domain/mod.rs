//! Domain layer containing business entities and interfaces.
//!
//! The domain layer has no dependencies on infrastructure or presentation
//! concerns. Repository and publisher traits defined here are implemented by
//! [`crate::infrastructure`] and orchestrated by
//! [`crate::application::services`].
//!
//! # Modules
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`resolve_event`] - Resolution analytics event and publisher trait
//! - [`analytics_worker`] - Asynchronous event shipping worker

pub mod analytics_worker;
pub mod entities;
pub mod repositories;
pub mod resolve_event;
