//! Article entity representing a single validated blog post.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::errors::ValidationError;
use crate::domain::text::{char_len, contains_any_word, contains_letter};

/// `strftime` pattern of the canonical `YYYY-MM-DD HH:MM:SS` timestamp.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Words that mark page chrome rather than content.
pub const SYSTEM_WORDS: &[&str] = &[
    "navigation",
    "menu",
    "footer",
    "sidebar",
    "навигация",
    "меню",
];

const TITLE_MIN_CHARS: usize = 5;
const TITLE_MAX_CHARS: usize = 200;
const DESCRIPTION_MAX_CHARS: usize = 1000;
const FORBIDDEN_LINK_PATTERNS: &[&str] = &["javascript:", "mailto:", "#"];

/// Formats a timestamp in the canonical textual representation.
pub fn canonical_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(CANONICAL_FORMAT).to_string()
}

/// Current UTC instant in canonical form.
pub fn canonical_now() -> String {
    canonical_timestamp(Utc::now().naive_utc())
}

/// Publication date as supplied to [`Article::new`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ArticleDate {
    /// No date was found; the article is stamped with the current instant.
    #[default]
    Now,
    /// Already textual; stored unchanged.
    Text(String),
    /// Structured value converted to canonical form.
    Timestamp(NaiveDateTime),
}

impl From<Option<String>> for ArticleDate {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Now, Self::Text)
    }
}

impl From<String> for ArticleDate {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for ArticleDate {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<NaiveDateTime> for ArticleDate {
    fn from(value: NaiveDateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl From<DateTime<Utc>> for ArticleDate {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Timestamp(value.naive_utc())
    }
}

/// Input data for constructing an [`Article`].
#[derive(Debug, Clone, Default)]
pub struct NewArticle {
    pub id: Option<i64>,
    pub title: String,
    pub link: String,
    pub description: String,
    pub date: ArticleDate,
}

/// A validated blog article.
///
/// Construction goes through [`Article::new`], which either yields a fully valid
/// instance or a [`ValidationError`]. Fields are read-only afterwards.
///
/// Serializes with the storage field name `descr` for the description;
/// deserialization re-runs validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ArticleRecord", into = "ArticleRecord")]
pub struct Article {
    id: Option<i64>,
    title: String,
    link: String,
    description: String,
    date: String,
}

impl Article {
    /// Validates the input and creates an article.
    ///
    /// # Rules
    ///
    /// - **Title**: trimmed, 5–200 characters, contains a letter, no system words
    /// - **Link**: non-empty, no `javascript:`/`mailto:`/`#`, absolute (`http…`) or root-relative
    /// - **Description**: trimmed, at most 1000 characters, may be empty
    /// - **Date**: current instant when absent or empty, text passes unchanged,
    ///   timestamps are formatted as `YYYY-MM-DD HH:MM:SS`
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn new(input: NewArticle) -> Result<Self, ValidationError> {
        Ok(Self {
            id: input.id,
            title: validate_title(&input.title)?,
            link: validate_link(&input.link)?,
            description: validate_description(&input.description)?,
            date: resolve_date(input.date),
        })
    }

    /// Reconstitutes an article from a storage row.
    ///
    /// Rows are validated again; a corrupted row is reported instead of leaking.
    pub fn from_stored(
        id: i64,
        title: String,
        link: String,
        description: Option<String>,
        date: Option<String>,
    ) -> Result<Self, ValidationError> {
        Self::new(NewArticle {
            id: Some(id),
            title,
            link,
            description: description.unwrap_or_default(),
            date: date.into(),
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Returns a copy carrying the given storage identifier.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Case-insensitive substring match against the title or the description.
    ///
    /// Blank terms never match.
    pub fn contains_search_word(&self, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return false;
        }

        self.title.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}

fn validate_title(title: &str) -> Result<String, ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::TitleMissing);
    }

    let trimmed = title.trim();
    let len = char_len(trimmed);
    if !(TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&len) {
        return Err(ValidationError::TitleLength);
    }

    if !contains_letter(trimmed) {
        return Err(ValidationError::TitleWithoutLetters);
    }

    if contains_any_word(trimmed, SYSTEM_WORDS) {
        return Err(ValidationError::TitleSystemWords);
    }

    Ok(trimmed.to_string())
}

fn validate_link(link: &str) -> Result<String, ValidationError> {
    let trimmed = link.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::LinkMissing);
    }

    if contains_any_word(trimmed, FORBIDDEN_LINK_PATTERNS) {
        return Err(ValidationError::LinkInvalidPattern);
    }

    if !trimmed.starts_with("http") && !trimmed.starts_with('/') {
        return Err(ValidationError::LinkNotUrl);
    }

    Ok(trimmed.to_string())
}

fn validate_description(description: &str) -> Result<String, ValidationError> {
    let trimmed = description.trim();
    if char_len(trimmed) > DESCRIPTION_MAX_CHARS {
        return Err(ValidationError::DescriptionTooLong);
    }

    Ok(trimmed.to_string())
}

fn resolve_date(date: ArticleDate) -> String {
    match date {
        ArticleDate::Text(text) if !text.is_empty() => text,
        ArticleDate::Text(_) | ArticleDate::Now => canonical_now(),
        ArticleDate::Timestamp(timestamp) => canonical_timestamp(timestamp),
    }
}

/// Wire and storage shape of an [`Article`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ArticleRecord {
    id: Option<i64>,
    title: String,
    link: String,
    #[serde(rename = "descr", default)]
    description: String,
    #[serde(default)]
    date: Option<String>,
}

impl TryFrom<ArticleRecord> for Article {
    type Error = ValidationError;

    fn try_from(record: ArticleRecord) -> Result<Self, Self::Error> {
        Article::new(NewArticle {
            id: record.id,
            title: record.title,
            link: record.link,
            description: record.description,
            date: record.date.into(),
        })
    }
}

impl From<Article> for ArticleRecord {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            title: article.title,
            link: article.link,
            description: article.description,
            date: Some(article.date),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn input(title: &str, link: &str) -> NewArticle {
        NewArticle {
            title: title.to_string(),
            link: link.to_string(),
            description: "Short summary of the post".to_string(),
            date: ArticleDate::Text("2023-12-01 10:00:00".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_article_creation() {
        let article = Article::new(input("  Введение в JavaScript  ", "/blog/js")).unwrap();

        assert_eq!(article.id(), None);
        assert_eq!(article.title(), "Введение в JavaScript");
        assert_eq!(article.link(), "/blog/js");
        assert_eq!(article.description(), "Short summary of the post");
        assert_eq!(article.date(), "2023-12-01 10:00:00");
    }

    #[test]
    fn test_title_length_bounds() {
        assert_eq!(
            Article::new(input("", "/a")).unwrap_err(),
            ValidationError::TitleMissing
        );
        assert_eq!(
            Article::new(input("Abcd", "/a")).unwrap_err(),
            ValidationError::TitleLength
        );
        assert!(Article::new(input("Abcde", "/a")).is_ok());
        assert!(Article::new(input(&"я".repeat(200), "/a")).is_ok());
        assert_eq!(
            Article::new(input(&"я".repeat(201), "/a")).unwrap_err(),
            ValidationError::TitleLength
        );
    }

    #[test]
    fn test_title_requires_letters() {
        assert_eq!(
            Article::new(input("12345 678", "/a")).unwrap_err(),
            ValidationError::TitleWithoutLetters
        );
    }

    #[test]
    fn test_title_rejects_system_words() {
        for title in ["Главное меню", "Site Navigation", "Footer links", "НАВИГАЦИЯ по сайту"] {
            assert_eq!(
                Article::new(input(title, "/a")).unwrap_err(),
                ValidationError::TitleSystemWords,
                "{title}"
            );
        }
    }

    #[test]
    fn test_link_rules() {
        assert_eq!(
            Article::new(input("Valid title", "   ")).unwrap_err(),
            ValidationError::LinkMissing
        );
        assert_eq!(
            Article::new(input("Valid title", "javascript:void(0)")).unwrap_err(),
            ValidationError::LinkInvalidPattern
        );
        assert_eq!(
            Article::new(input("Valid title", "mailto:a@b.c")).unwrap_err(),
            ValidationError::LinkInvalidPattern
        );
        assert_eq!(
            Article::new(input("Valid title", "#top")).unwrap_err(),
            ValidationError::LinkInvalidPattern
        );
        assert_eq!(
            Article::new(input("Valid title", "blog/post")).unwrap_err(),
            ValidationError::LinkNotUrl
        );
        assert!(Article::new(input("Valid title", "https://blog.test/post")).is_ok());
    }

    #[test]
    fn test_description_limit() {
        let mut data = input("Valid title", "/a");
        data.description = "x".repeat(1000);
        assert!(Article::new(data.clone()).is_ok());

        data.description = "x".repeat(1001);
        assert_eq!(
            Article::new(data).unwrap_err(),
            ValidationError::DescriptionTooLong
        );
    }

    #[test]
    fn test_date_defaults_to_now() {
        let mut data = input("Valid title", "/a");
        data.date = ArticleDate::Now;
        let article = Article::new(data).unwrap();

        assert!(NaiveDateTime::parse_from_str(article.date(), CANONICAL_FORMAT).is_ok());
    }

    #[test]
    fn test_empty_date_text_defaults_to_now() {
        let mut data = input("Valid title", "/a");
        data.date = ArticleDate::Text(String::new());
        let article = Article::new(data).unwrap();

        assert_eq!(article.date().len(), "2023-12-01 10:00:00".len());
    }

    #[test]
    fn test_structured_date_is_canonicalised() {
        let mut data = input("Valid title", "/a");
        data.date = NaiveDate::from_ymd_opt(2023, 3, 15)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
            .into();

        assert_eq!(Article::new(data).unwrap().date(), "2023-03-15 14:30:00");
    }

    #[test]
    fn test_contains_search_word() {
        let mut data = input("Rust для начинающих", "/a");
        data.description = "Разбираем владение и заимствование".to_string();
        let article = Article::new(data).unwrap();

        assert!(article.contains_search_word("RUST"));
        assert!(article.contains_search_word("  владение "));
        assert!(!article.contains_search_word("python"));
        assert!(!article.contains_search_word(""));
        assert!(!article.contains_search_word("   "));
    }

    #[test]
    fn test_serde_round_trip() {
        let article = Article::new(input("Vue.js для начинающих", "https://blog.test/vue"))
            .unwrap()
            .with_id(7);

        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["descr"], "Short summary of the post");
        assert_eq!(json["id"], 7);

        let back: Article = serde_json::from_value(json).unwrap();
        assert_eq!(back, article);
    }

    #[test]
    fn test_deserialize_rejects_invalid_article() {
        let json = serde_json::json!({
            "id": null,
            "title": "Menu",
            "link": "/a",
            "descr": "",
            "date": "2023-12-01 10:00:00"
        });

        assert!(serde_json::from_value::<Article>(json).is_err());
    }

    #[test]
    fn test_from_stored() {
        let article = Article::from_stored(
            3,
            "Stored article".to_string(),
            "/blog/stored".to_string(),
            None,
            Some("2024-01-02 03:04:05".to_string()),
        )
        .unwrap();

        assert_eq!(article.id(), Some(3));
        assert_eq!(article.description(), "");
        assert_eq!(article.date(), "2024-01-02 03:04:05");
    }
}
