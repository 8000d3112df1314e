//! Business logic services for the application layer.

pub mod article_service;

pub use article_service::{ArticleService, SearchOutcome, SourceStatus};
