//! Search word value object.

use std::fmt;

use crate::domain::errors::ValidationError;
use crate::domain::text::{char_len, contains_letter};

const MIN_CHARS: usize = 2;
const MAX_CHARS: usize = 100;

/// A validated, trimmed search word.
///
/// Equality compares the trimmed value and is case-sensitive; use
/// [`SearchQuery::to_lowercase`] for case-folded matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Validates and wraps a search word.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::SearchWordEmpty`] when nothing remains after trimming
    /// - [`ValidationError::SearchWordTooShort`] below 2 characters
    /// - [`ValidationError::SearchWordTooLong`] above 100 characters
    /// - [`ValidationError::SearchWordWithoutLetters`] when no Latin or Cyrillic letter is present
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        let trimmed = value.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::SearchWordEmpty);
        }

        let len = char_len(trimmed);
        if len < MIN_CHARS {
            return Err(ValidationError::SearchWordTooShort);
        }
        if len > MAX_CHARS {
            return Err(ValidationError::SearchWordTooLong);
        }

        if !contains_letter(trimmed) {
            return Err(ValidationError::SearchWordWithoutLetters);
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_lowercase(&self) -> String {
        self.0.to_lowercase()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SearchQuery {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for SearchQuery {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_value() {
        let query = SearchQuery::new("  react  ").unwrap();
        assert_eq!(query.as_str(), "react");
        assert_eq!(query.to_string(), "react");
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(SearchQuery::new("").unwrap_err(), ValidationError::SearchWordEmpty);
        assert_eq!(SearchQuery::new("   ").unwrap_err(), ValidationError::SearchWordEmpty);
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(SearchQuery::new("a").unwrap_err(), ValidationError::SearchWordTooShort);
        assert!(SearchQuery::new("ab").is_ok());
        assert!(SearchQuery::new(&"ж".repeat(100)).is_ok());
        assert_eq!(
            SearchQuery::new(&"ж".repeat(101)).unwrap_err(),
            ValidationError::SearchWordTooLong
        );
    }

    #[test]
    fn test_requires_letter() {
        assert_eq!(
            SearchQuery::new("2024").unwrap_err(),
            ValidationError::SearchWordWithoutLetters
        );
        assert!(SearchQuery::new("C#").is_ok());
        assert!(SearchQuery::new("ИИ").is_ok());
    }

    #[test]
    fn test_equality_is_case_sensitive() {
        let lower = SearchQuery::new("rust").unwrap();
        let upper = SearchQuery::new("Rust").unwrap();

        assert_eq!(lower, SearchQuery::new(" rust ").unwrap());
        assert_ne!(lower, upper);
        assert_eq!(lower.to_lowercase(), upper.to_lowercase());
    }
}
