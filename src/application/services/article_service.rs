//! Article listing and search service.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::blog_parser::{BlogParser, SourceHealth};
use crate::domain::entities::Article;
use crate::domain::errors::ValidationError;
use crate::domain::repositories::ArticleRepository;
use crate::domain::search_query::SearchQuery;
use crate::error::AppError;

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub query: SearchQuery,
    pub articles: Vec<Article>,
    pub count: usize,
}

/// Reachability of the blog together with its circuit breaker state.
#[derive(Debug, Clone, Serialize)]
pub struct SourceStatus {
    pub available: bool,
    pub circuit: SourceHealth,
}

/// Coordinates the blog parser and the article store.
///
/// A search replaces the stored set with a fresh parse, then queries it, so the
/// stored articles always reflect the last successful parse.
pub struct ArticleService {
    repository: Arc<dyn ArticleRepository>,
    parser: Arc<dyn BlogParser>,
}

impl ArticleService {
    pub fn new(repository: Arc<dyn ArticleRepository>, parser: Arc<dyn BlogParser>) -> Self {
        Self { repository, parser }
    }

    /// Returns the articles stored by the last search, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn get_articles(&self) -> Result<Vec<Article>, AppError> {
        self.repository.find_all().await
    }

    /// Parses the blog, stores every article and returns those matching `search_word`.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the search word is invalid; the blog is not fetched
    /// - [`AppError::Unavailable`] if the blog could not be fetched or parsed
    /// - [`AppError::Internal`] on storage errors
    pub async fn search_articles(&self, search_word: &str) -> Result<SearchOutcome, AppError> {
        let query = SearchQuery::new(search_word)?;

        let parsed = self.parser.parse_articles().await?;
        let parsed_count = parsed.len();

        self.repository.save_all(parsed).await?;
        let articles = self
            .repository
            .find_by_search_query(query.as_str())
            .await?;

        info!(
            query = %query,
            parsed = parsed_count,
            count = articles.len(),
            "Search completed"
        );

        Ok(SearchOutcome {
            count: articles.len(),
            query,
            articles,
        })
    }

    /// Same as [`Self::search_articles`] for an optional word.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the word is absent, otherwise see
    /// [`Self::search_articles`].
    pub async fn search_optional(
        &self,
        search_word: Option<&str>,
    ) -> Result<SearchOutcome, AppError> {
        let word = search_word.ok_or(ValidationError::SearchWordMissing)?;
        self.search_articles(word).await
    }

    /// Probes the blog once and reports the circuit breaker state after the probe.
    pub async fn source_status(&self) -> SourceStatus {
        let available = self.parser.is_source_available().await;
        SourceStatus {
            available,
            circuit: self.parser.source_health(),
        }
    }

    /// Circuit breaker state without touching the network.
    pub fn source_health(&self) -> SourceHealth {
        self.parser.source_health()
    }

    /// Forces the source circuit back to `CLOSED` and returns the new state.
    pub fn reset_circuit(&self) -> SourceHealth {
        self.parser.reset_source_circuit();
        self.parser.source_health()
    }

    /// Removes every stored article.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    pub async fn clear_articles(&self) -> Result<(), AppError> {
        self.repository.clear().await
    }

    /// Checks that the store answers queries.
    pub async fn storage_ready(&self) -> Result<(), AppError> {
        self.repository.find_all().await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::blog_parser::MockBlogParser;
    use crate::domain::entities::NewArticle;
    use crate::domain::errors::ParseError;
    use crate::domain::repositories::MockArticleRepository;
    use axum::http::StatusCode;

    fn create_test_article(title: &str, description: &str) -> Article {
        Article::new(NewArticle {
            title: title.to_string(),
            link: "https://blog.test/post".to_string(),
            description: description.to_string(),
            date: "2024-01-01 10:00:00".into(),
            ..Default::default()
        })
        .unwrap()
    }

    fn closed_health() -> SourceHealth {
        SourceHealth {
            url: "https://blog.test/blog".to_string(),
            circuit_state: "CLOSED".to_string(),
            failures: 0,
            failure_threshold: 5,
            last_failure_at: None,
        }
    }

    fn service(repo: MockArticleRepository, parser: MockBlogParser) -> ArticleService {
        ArticleService::new(Arc::new(repo), Arc::new(parser))
    }

    #[tokio::test]
    async fn test_search_parses_saves_and_queries() {
        let mut mock_parser = MockBlogParser::new();
        mock_parser.expect_parse_articles().times(1).returning(|| {
            Ok(vec![
                create_test_article("Асинхронный Rust", "Про tokio"),
                create_test_article("Введение в Python", "Про типы"),
            ])
        });

        let mut mock_repo = MockArticleRepository::new();
        mock_repo
            .expect_save_all()
            .times(1)
            .withf(|articles| articles.len() == 2)
            .returning(Ok);
        mock_repo
            .expect_find_by_search_query()
            .times(1)
            .returning(|query| {
                assert_eq!(query, "rust");
                Ok(vec![create_test_article("Асинхронный Rust", "Про tokio").with_id(1)])
            });

        let outcome = service(mock_repo, mock_parser)
            .search_articles("  rust  ")
            .await
            .unwrap();

        assert_eq!(outcome.query.as_str(), "rust");
        assert_eq!(outcome.count, 1);
        assert_eq!(outcome.articles[0].id(), Some(1));
    }

    #[tokio::test]
    async fn test_invalid_search_word_skips_parsing() {
        let mut mock_parser = MockBlogParser::new();
        mock_parser.expect_parse_articles().times(0);
        let mut mock_repo = MockArticleRepository::new();
        mock_repo.expect_save_all().times(0);

        let result = service(mock_repo, mock_parser).search_articles("1").await;

        let err = result.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Search word is too short (minimum 2 characters)");
    }

    #[tokio::test]
    async fn test_missing_search_word() {
        let result = service(MockArticleRepository::new(), MockBlogParser::new())
            .search_optional(None)
            .await;

        assert_eq!(
            result.unwrap_err().message(),
            "Search word is required and must be a string"
        );
    }

    #[tokio::test]
    async fn test_parse_failure_keeps_stored_articles() {
        let mut mock_parser = MockBlogParser::new();
        mock_parser
            .expect_parse_articles()
            .returning(|| Err(ParseError::extraction("Circuit breaker is OPEN")));
        let mut mock_repo = MockArticleRepository::new();
        mock_repo.expect_save_all().times(0);

        let err = service(mock_repo, mock_parser)
            .search_articles("rust")
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_get_articles() {
        let mut mock_repo = MockArticleRepository::new();
        mock_repo
            .expect_find_all()
            .times(1)
            .returning(|| Ok(vec![create_test_article("Сохранённая статья", "")]));

        let articles = service(mock_repo, MockBlogParser::new())
            .get_articles()
            .await
            .unwrap();

        assert_eq!(articles.len(), 1);
    }

    #[tokio::test]
    async fn test_source_status_and_reset() {
        let mut mock_parser = MockBlogParser::new();
        mock_parser
            .expect_is_source_available()
            .times(1)
            .returning(|| false);
        mock_parser.expect_source_health().returning(closed_health);
        mock_parser
            .expect_reset_source_circuit()
            .times(1)
            .return_const(());

        let service = service(MockArticleRepository::new(), mock_parser);

        let status = service.source_status().await;
        assert!(!status.available);
        assert_eq!(status.circuit.circuit_state, "CLOSED");

        assert_eq!(service.reset_circuit().failures, 0);
    }
}
