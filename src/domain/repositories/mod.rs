//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by concrete repositories in `crate::infrastructure::persistence`.
//! Mock implementations are auto-generated via `mockall` for testing.
//!
//! # Available Repositories
//!
//! - [`ArticleRepository`] - Stored article set and text search

pub mod article_repository;

pub use article_repository::ArticleRepository;

#[cfg(test)]
pub use article_repository::MockArticleRepository;
