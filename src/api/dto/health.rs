//! DTO for the health check endpoint.

use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// `"ok"` when the cache backend answers, `"degraded"` otherwise.
    /// A degraded cache still serves traffic through the store.
    pub cache: &'static str,
}
