//! Contract for turning a remote blog page into validated articles.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::Article;
use crate::domain::errors::ParseError;

/// Point-in-time view of the upstream source and its circuit breaker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceHealth {
    pub url: String,
    /// `CLOSED`, `OPEN` or `HALF_OPEN`.
    pub circuit_state: String,
    pub failures: u32,
    pub failure_threshold: u32,
    pub last_failure_at: Option<DateTime<Utc>>,
}

impl SourceHealth {
    pub fn is_open(&self) -> bool {
        self.circuit_state == "OPEN"
    }
}

/// Extraction pipeline for a single blog source.
///
/// # Implementations
///
/// - [`crate::infrastructure::parsers::SiteBlogParser`] - fetch, extract, normalize, validate
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogParser: Send + Sync {
    /// Fetches the source and returns every candidate that validated.
    ///
    /// Never returns an empty list: when nothing survives, a single placeholder
    /// article is returned instead.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::ExtractionFailure`] when the page could not be fetched,
    /// including when the circuit breaker rejected the call.
    async fn parse_articles(&self) -> Result<Vec<Article>, ParseError>;

    /// Best-effort reachability probe. Errors are reported as `false`.
    async fn is_source_available(&self) -> bool;

    /// Current circuit breaker snapshot for the source.
    fn source_health(&self) -> SourceHealth;

    /// Forces the source circuit back to `CLOSED`.
    fn reset_source_circuit(&self);
}
