//! Handler for short link redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, header},
    response::Redirect,
};
use std::net::SocketAddr;

use crate::application::services::ClientInfo;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::client_ip;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Check cache for the URL
/// 2. On cache miss, query the database and repopulate the cache
/// 3. Publish one analytics event (success or error, with latency)
/// 4. Return 307 Temporary Redirect
///
/// Cache faults degrade to the database; analytics never blocks the
/// redirect.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<Redirect, AppError> {
    let client = ClientInfo {
        ip: client_ip(&headers, Some(addr), state.behind_proxy),
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        referrer: headers
            .get(header::REFERER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    };

    let long_url = state.link_service.resolve(&code, client).await?;
    Ok(Redirect::temporary(&long_url))
}
