//! Blog parser implementations.
//!
//! - [`SiteBlogParser`] - fetches one configured page and runs the extraction cascade

pub mod site_blog_parser;

pub use site_blog_parser::{PLACEHOLDER_DESCRIPTION, PLACEHOLDER_TITLE, SiteBlogParser};
