//! DTOs for article listing and search endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::services::SearchOutcome;
use crate::domain::entities::Article;

/// Request to parse the blog and search it.
///
/// `searchWord` is kept as raw JSON so a missing or non-string value is reported
/// as a validation error rather than a body rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default)]
    pub search_word: Option<Value>,
}

impl SearchRequest {
    /// The search word when it is present and a string.
    pub fn word(&self) -> Option<&str> {
        self.search_word.as_ref().and_then(Value::as_str)
    }
}

/// Search result with the articles that matched.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub success: bool,
    pub search_word: String,
    pub count: usize,
    pub results: Vec<Article>,
}

impl From<SearchOutcome> for SearchResponse {
    fn from(outcome: SearchOutcome) -> Self {
        Self {
            success: true,
            search_word: outcome.query.into_inner(),
            count: outcome.count,
            results: outcome.articles,
        }
    }
}
