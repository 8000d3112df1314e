//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`  - Health check: storage, source circuit (public)
//! - `/api/*`        - Article search and circuit reset (rate limited)
//! - anything else   - `404` JSON with the unmatched path and method
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/api` (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use anyhow::Result;
use axum::http::{Method, StatusCode, Uri};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
///
/// # Errors
///
/// Fails if the rate limiter cannot be configured.
pub fn app_router(state: AppState, behind_proxy: bool) -> Result<NormalizePath<Router>> {
    let api_router = api::routes::article_routes().layer(rate_limit::layer(behind_proxy)?);

    let router = base_router(api_router)
        .with_state(state)
        .layer(tracing::layer());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}

/// Same routes as [`app_router`] without rate limiting or path normalization.
///
/// Rate limiting needs the peer address from a real connection, which in-process
/// test clients do not provide.
pub fn router(state: AppState) -> Router {
    base_router(api::routes::article_routes()).with_state(state)
}

fn base_router(api_router: Router<AppState>) -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .fallback(not_found_handler)
}

async fn not_found_handler(method: Method, uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "path": uri.path(),
            "method": method.as_str(),
        })),
    )
}
