//! Business logic services for the application layer.

pub mod code_generator;
pub mod link_service;
pub mod reaper_service;

pub use code_generator::{CodeGenerator, GeneratedCode, SHARD_RANGE};
pub use link_service::{ClientInfo, LinkService};
pub use reaper_service::{ExpiryReaper, run_reaper};
