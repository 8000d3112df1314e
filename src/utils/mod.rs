//! Utility functions shared across layers.
//!
//! - [`url_normalizer`] - Link resolution against the blog origin

pub mod url_normalizer;
