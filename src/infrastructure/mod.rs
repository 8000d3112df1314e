//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer: fetching and
//! extracting articles from the blog, and storing them.
//!
//! # Modules
//!
//! - [`resilience`] - Retry with backoff and circuit breaking
//! - [`http`] - Page fetcher built on the resilience executor
//! - [`extraction`] - HTML to article candidates, date recognition
//! - [`parsers`] - Blog parser composing fetcher, extractor and validation
//! - [`persistence`] - PostgreSQL and in-memory repositories

pub mod extraction;
pub mod http;
pub mod parsers;
pub mod persistence;
pub mod resilience;
