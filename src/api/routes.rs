//! API route configuration.

use crate::api::handlers::{list_articles_handler, reset_circuit_handler, search_articles_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Article and circuit breaker routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET  /parse`          - Articles stored by the last search
/// - `POST /parse`          - Parse the blog, store all articles, return matches
/// - `POST /circuit/reset`  - Force the source circuit breaker to `CLOSED`
pub fn article_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/parse",
            get(list_articles_handler).post(search_articles_handler),
        )
        .route("/circuit/reset", post(reset_circuit_handler))
}
