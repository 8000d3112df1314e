//! HTML to article candidate extraction.
//!
//! [`ContentExtractor`] runs an ordered cascade of strategies over a page and
//! returns unvalidated [`RawCandidate`]s; [`DateParser`] normalizes the dates it
//! finds along the way. Selector lists, cleanup patterns and description
//! templates live in [`rules`] as plain tables.

mod content_extractor;
mod date_parser;
mod proximity;
pub mod rules;

pub use content_extractor::{
    ContentExtractor, RawCandidate, STRATEGY_ORDER, Strategy, enrich_descriptions,
};
pub use date_parser::{DateParser, RU_MONTHS};
