//! Repository trait for article data access.

use crate::domain::entities::Article;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the stored article set.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgArticleRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryArticleRepository`] - process-local fallback
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_article.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Returns every stored article, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_all(&self) -> Result<Vec<Article>, AppError>;

    /// Replaces the whole stored set with `articles`.
    ///
    /// Runs as clear-then-insert in one transaction: either every article is
    /// stored or the previous set is kept. Returns the stored articles with ids.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn save_all(&self, articles: Vec<Article>) -> Result<Vec<Article>, AppError>;

    /// Removes every stored article.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn clear(&self) -> Result<(), AppError>;

    /// Case-insensitive substring search over title and description, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_search_query(&self, query: &str) -> Result<Vec<Article>, AppError>;
}
