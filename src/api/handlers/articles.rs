//! Handlers for article listing and search endpoints.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::json;

use crate::api::dto::articles::{SearchRequest, SearchResponse};
use crate::domain::entities::Article;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the articles stored by the last search.
///
/// # Endpoint
///
/// `GET /api/parse`
///
/// # Response
///
/// ```json
/// [
///   {
///     "id": 1,
///     "title": "Введение в JavaScript",
///     "link": "https://is-systems.org/blog/javascript-intro",
///     "descr": "Основы программирования на JavaScript",
///     "date": "2023-12-01 10:00:00"
///   }
/// ]
/// ```
pub async fn list_articles_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Article>>, AppError> {
    let articles = state.article_service.get_articles().await?;
    Ok(Json(articles))
}

/// Parses the blog, replaces the stored articles and returns the matches.
///
/// # Endpoint
///
/// `POST /api/parse`
///
/// # Request Body
///
/// ```json
/// { "searchWord": "javascript" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "success": true,
///   "searchWord": "javascript",
///   "count": 1,
///   "results": [ { "id": 1, "title": "...", "link": "...", "descr": "...", "date": "..." } ]
/// }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: malformed body or invalid search word
/// - **503 Service Unavailable**: the blog could not be fetched or parsed
pub async fn search_articles_handler(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, AppError> {
    let Json(request) = payload.map_err(|rejection| {
        AppError::bad_request(
            "Invalid request body",
            json!({ "reason": rejection.body_text() }),
        )
    })?;

    let outcome = state.article_service.search_optional(request.word()).await?;
    Ok(Json(outcome.into()))
}
