//! PostgreSQL repository implementations.

mod pg_counter_repository;
mod pg_link_repository;

pub use pg_counter_repository::PgCounterRepository;
pub use pg_link_repository::PgLinkRepository;
