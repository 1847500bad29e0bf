//! Request/response data transfer objects.

pub mod health;
pub mod shorten;
