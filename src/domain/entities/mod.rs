//! Core domain entities representing the business data model.
//!
//! # Entity Types
//!
//! - [`Article`] - A validated blog post
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with a separate struct for creation:
//! [`NewArticle`] carries raw input, [`Article::new`] validates it.

pub mod article;

pub use article::{
    Article, ArticleDate, CANONICAL_FORMAT, NewArticle, SYSTEM_WORDS, canonical_now,
    canonical_timestamp,
};
