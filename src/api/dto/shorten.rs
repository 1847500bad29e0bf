//! DTOs for the link shortening endpoint.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::Link;

/// Custom codes share the base-62 alphabet of generated codes.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z]+$").unwrap());

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,

    /// Optional caller-chosen short code.
    #[validate(length(min = 4, max = 50))]
    #[validate(regex(path = "*CUSTOM_CODE_REGEX"))]
    pub custom_code: Option<String>,
}

/// Response for a successfully created short link.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub code: String,
    pub short_url: String,
    pub long_url: String,
    pub expires_at: DateTime<Utc>,
}

impl ShortenResponse {
    pub fn from_link(link: Link, short_url: String) -> Self {
        Self {
            code: link.code,
            short_url,
            long_url: link.long_url,
            expires_at: link.expiry_time,
        }
    }
}
