//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod articles;
pub mod circuit;
pub mod health;

pub use articles::{list_articles_handler, search_articles_handler};
pub use circuit::reset_circuit_handler;
pub use health::health_handler;
