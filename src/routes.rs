//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{code}`     - Short link redirect (rate limited)
//! - `POST /api/shorten` - Create a short link (rate limited)
//! - `GET  /health`     - Health check, never throttled
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP fixed-window-with-block against Redis

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler};
use crate::api::middleware::rate_limit::rate_limit;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    let throttled = Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/api/shorten", post(shorten_handler))
        .layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    Router::new()
        .route("/health", get(health_handler))
        .merge(throttled)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
