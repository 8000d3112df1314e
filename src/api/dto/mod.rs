//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Field validation
//! lives in the domain value objects, not here.

pub mod articles;
pub mod health;
