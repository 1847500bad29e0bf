//! Client IP extraction from connection info and proxy headers.

use axum::http::HeaderMap;
use std::net::SocketAddr;

/// Resolves the client IP used as the rate limiter key and in analytics.
///
/// Proxy headers are only trusted when `behind_proxy` is set; otherwise the
/// socket peer address wins. Returns `None` when neither source is usable
/// (e.g. in tests without connect info).
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, behind_proxy: bool) -> Option<String> {
    if behind_proxy {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        if forwarded.is_some() {
            return forwarded;
        }

        let real_ip = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        if real_ip.is_some() {
            return real_ip;
        }
    }

    peer.map(|addr| addr.ip().to_string())
}
