//! Data access trait definitions implemented by the infrastructure layer.

mod counter_repository;
mod link_repository;

pub use counter_repository::CounterRepository;
pub use link_repository::LinkRepository;

#[cfg(test)]
pub use counter_repository::MockCounterRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
