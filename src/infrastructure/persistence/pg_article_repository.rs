//! PostgreSQL implementation of the article repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::Article;
use crate::domain::repositories::ArticleRepository;
use crate::error::AppError;

const SELECT_ARTICLES: &str = r#"
    SELECT id, title, link, descr, to_char(date, 'YYYY-MM-DD HH24:MI:SS') AS date
    FROM posts
"#;

const ORDER_NEWEST_FIRST: &str = "ORDER BY posts.date DESC NULLS LAST, posts.id";

#[derive(Debug, FromRow)]
struct ArticleRow {
    id: i64,
    title: String,
    link: String,
    descr: Option<String>,
    date: Option<String>,
}

impl TryFrom<ArticleRow> for Article {
    type Error = AppError;

    fn try_from(row: ArticleRow) -> Result<Self, Self::Error> {
        let id = row.id;
        Article::from_stored(row.id, row.title, row.link, row.descr, row.date).map_err(|e| {
            tracing::error!(id, error = %e, "Stored article failed validation");
            AppError::internal(
                "Stored article is invalid",
                json!({ "id": id, "reason": e.to_string() }),
            )
        })
    }
}

/// Escapes `LIKE` wildcards so the query is matched literally.
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// PostgreSQL repository for the `posts` table.
///
/// Queries are built at runtime, so no database is needed at compile time.
pub struct PgArticleRepository {
    pool: Arc<PgPool>,
}

impl PgArticleRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArticleRepository for PgArticleRepository {
    async fn find_all(&self) -> Result<Vec<Article>, AppError> {
        let rows: Vec<ArticleRow> =
            sqlx::query_as(&format!("{SELECT_ARTICLES} {ORDER_NEWEST_FIRST}"))
                .fetch_all(self.pool.as_ref())
                .await?;

        rows.into_iter().map(Article::try_from).collect()
    }

    async fn save_all(&self, articles: Vec<Article>) -> Result<Vec<Article>, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM posts").execute(&mut *tx).await?;

        let mut saved = Vec::with_capacity(articles.len());
        for article in articles {
            let id: i64 = sqlx::query_scalar(
                r#"
                INSERT INTO posts (title, link, descr, date)
                VALUES ($1, $2, $3, CAST($4 AS TIMESTAMP))
                RETURNING id
                "#,
            )
            .bind(article.title())
            .bind(article.link())
            .bind(article.description())
            .bind(article.date())
            .fetch_one(&mut *tx)
            .await?;

            saved.push(article.with_id(id));
        }

        tx.commit().await?;

        tracing::debug!(count = saved.len(), "Replaced stored articles");
        Ok(saved)
    }

    async fn clear(&self) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM posts")
            .execute(self.pool.as_ref())
            .await?;

        tracing::debug!(deleted = result.rows_affected(), "Cleared stored articles");
        Ok(())
    }

    async fn find_by_search_query(&self, query: &str) -> Result<Vec<Article>, AppError> {
        let rows: Vec<ArticleRow> = sqlx::query_as(&format!(
            "{SELECT_ARTICLES} WHERE title ILIKE $1 OR descr ILIKE $1 {ORDER_NEWEST_FIRST}"
        ))
        .bind(like_pattern(query))
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Article::try_from).collect()
    }
}
