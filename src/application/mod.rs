//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating the blog parser and
//! the article repository. Services consume domain traits and provide a clean
//! API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::article_service::ArticleService`] - Article listing, search and source health

pub mod services;
