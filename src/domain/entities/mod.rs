//! Core business data structures.

mod link;

pub use link::{Link, NewLink};
