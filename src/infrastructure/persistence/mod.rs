//! Article repository implementations.
//!
//! # Repositories
//!
//! - [`PgArticleRepository`] - PostgreSQL `posts` table via SQLx
//! - [`InMemoryArticleRepository`] - process-local fallback when no database is configured

pub mod in_memory_article_repository;
pub mod pg_article_repository;

pub use in_memory_article_repository::InMemoryArticleRepository;
pub use pg_article_repository::PgArticleRepository;
