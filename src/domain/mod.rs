//! Domain layer containing business entities and logic.
//!
//! This module implements the core domain logic following Clean Architecture principles.
//! It defines entities, value objects, repository interfaces, and the blog parser
//! contract independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Validated business data structures ([`entities::Article`])
//! - [`search_query`] - Search word value object
//! - [`repositories`] - Data access trait definitions
//! - [`blog_parser`] - Contract for turning a remote blog page into articles
//! - [`errors`] - Validation and parsing failures
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Entities either construct fully valid or fail; there are no half-built instances
//! - Repository and parser traits are implemented by the infrastructure layer

pub mod blog_parser;
pub mod entities;
pub mod errors;
pub mod repositories;
pub mod search_query;
pub mod text;

pub use errors::{ParseError, ValidationError};
