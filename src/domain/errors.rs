//! Domain error types.

/// Boxed error used to carry lower-level failures across layer boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A field of an [`crate::domain::entities::Article`] or
/// [`crate::domain::search_query::SearchQuery`] was rejected.
///
/// Validation failures describe caller input and are never retried.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required and must be a string")]
    TitleMissing,

    #[error("Title must be between 5 and 200 characters")]
    TitleLength,

    #[error("Title must contain letters")]
    TitleWithoutLetters,

    #[error("Title contains system words")]
    TitleSystemWords,

    #[error("Link is required and must be a string")]
    LinkMissing,

    #[error("Link contains invalid patterns")]
    LinkInvalidPattern,

    #[error("Link must be absolute or relative URL")]
    LinkNotUrl,

    #[error("Description is too long (max 1000 characters)")]
    DescriptionTooLong,

    #[error("Search word is required and must be a string")]
    SearchWordMissing,

    #[error("Search word cannot be empty")]
    SearchWordEmpty,

    #[error("Search word is too short (minimum 2 characters)")]
    SearchWordTooShort,

    #[error("Search word is too long (maximum 100 characters)")]
    SearchWordTooLong,

    #[error("Search word must contain letters")]
    SearchWordWithoutLetters,
}

/// The extraction pipeline could not produce a result.
///
/// Wraps fetch-level and circuit breaker failures. The message prefix lets the
/// HTTP boundary tell "source unavailable" apart from raw network errors.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to parse blog: {source}")]
    ExtractionFailure {
        #[source]
        source: BoxError,
    },
}

impl ParseError {
    /// Wraps any lower-level failure as an extraction failure.
    pub fn extraction(source: impl Into<BoxError>) -> Self {
        Self::ExtractionFailure {
            source: source.into(),
        }
    }
}
