//! Rate limiting middleware backed by the distributed limiter.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::net::SocketAddr;
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Gates a request through the per-IP fixed-window-with-block limiter.
///
/// Blocked callers get `429 Too Many Requests` with a `Retry-After` header
/// derived from the remaining block time. A failing limiter store allows the
/// request through (fail-open): availability is prioritized over strict
/// enforcement.
///
/// Attach with `axum::middleware::from_fn_with_state`.
pub async fn rate_limit(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    let key = client_ip(req.headers(), peer, state.behind_proxy)
        .unwrap_or_else(|| "unknown".to_string());

    match state.rate_limiter.hit(&key, &state.rate_limit_quota).await {
        Ok(decision) if decision.blocked => {
            warn!(%key, hits = decision.total_hits, "request blocked by rate limiter");
            AppError::RateLimited {
                retry_after_secs: decision.retry_after_secs(),
            }
            .into_response()
        }
        Ok(_) => next.run(req).await,
        Err(e) => {
            warn!("rate limit store unavailable, allowing request: {e}");
            next.run(req).await
        }
    }
}
