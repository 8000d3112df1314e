//! Declarative lookup data for the content extractor.
//!
//! Every cascade is an ordered table: the first entry that yields a value wins.
//! Reordering a table changes extraction priority and nothing else.

use std::sync::LazyLock;

use regex::Regex;
use scraper::Selector;

use crate::domain::text::{char_len, collapse_whitespace, contains_any_word, contains_letter};

/// Article block selectors, from site-specific to generic.
pub const BLOCK_SELECTORS: &[&str] = &[
    "article.widg_newsblock_element",
    ".widg_newsblock_element",
    ".post, .entry, .blog-post, .article",
    ".post-item, .blog-item, .article-item",
    ".content-item, .news-item, .story",
    "article, .article-content",
    ".hentry, .post-content",
    "[class*=\"post\"], [class*=\"article\"], [class*=\"blog\"]",
    ".blog-article, .blog-entry",
    "[class*=\"blog\"], [id*=\"blog\"]",
    ".news-item, .news-article",
];

pub const TITLE_SELECTORS: &[&str] = &[
    ".widg_news_link",
    "a.widg_news_link",
    "h1, h2, h3, h4, h5, h6",
    ".title, .post-title, .article-title, .entry-title",
    ".headline, .heading",
    "a[title]",
    "a",
];

pub const LINK_SELECTORS: &[&str] = &[".widg_news_link", "a.widg_news_link", "a", "[href]"];

pub const DESCRIPTION_SELECTORS: &[&str] = &[
    ".widg_news_short_doc",
    "div.widg_news_short_doc",
    "[itemprop=\"description\"]",
    "p, .description, .excerpt, .summary, .intro",
    ".post-excerpt, .article-excerpt, .entry-excerpt",
    ".content p:first-of-type",
    ".text, .body, .post-content p:first-of-type",
    "div[class*=\"desc\"], div[class*=\"excerpt\"], div[class*=\"summary\"]",
    ".lead, .subtitle, .abstract",
    "[class*=\"preview\"], [class*=\"snippet\"]",
];

/// Description selectors for proximity search around headings and links.
pub const NEARBY_DESCRIPTION_SELECTORS: &[&str] = &[
    "p, .description, .excerpt, .summary, .intro",
    ".post-excerpt, .article-excerpt, .entry-excerpt",
    ".content, .text, .body",
    "div[class*=\"desc\"], div[class*=\"excerpt\"], div[class*=\"summary\"]",
    ".lead, .subtitle, .abstract",
    "[class*=\"preview\"], [class*=\"snippet\"]",
    "span, div",
];

pub const DATE_SELECTORS: &[&str] = &[
    ".widg_news_pub_time",
    "div.widg_news_pub_time",
    "time, .date, .published, .post-date, .entry-date",
    ".meta-date, .article-date, .blog-date",
    "[datetime]",
    ".timestamp, .created, .updated",
    "span[class*=\"date\"], div[class*=\"date\"]",
    ".meta, .post-meta, .article-meta",
];

pub const HEADING_SELECTOR: &str = "h1, h2, h3, h4, h5, h6";

/// Anchors whose target looks like a content page.
pub const CONTENT_LINK_SELECTOR: &str =
    "a[href*=\"/blog\"], a[href*=\"/post\"], a[href*=\"/article\"], a[href*=\"/news\"]";

/// Keyword → synthesized description for candidates without a usable one.
pub const DESCRIPTION_TEMPLATES: &[(&[&str], &str)] = &[
    (
        &["gpt", "chatgpt"],
        "Статья о технологиях искусственного интеллекта и языковых моделях GPT.",
    ),
    (
        &["безопасность", "security"],
        "Материал о вопросах информационной безопасности и защиты данных.",
    ),
    (
        &["данных", "data"],
        "Обзор вопросов обработки и защиты персональных данных.",
    ),
    (
        &["италия", "запрет"],
        "Новости о регулировании технологий в различных странах.",
    ),
];

pub const NAVIGATION_WORDS: &[&str] = &["navigation", "menu", "навигация", "меню"];

/// Markers of call-to-action fragments that never belong in a summary.
pub const READ_MORE_MARKERS: &[&str] = &["читать", "подробнее", "read more"];

/// Descriptions shorter than this are replaced by a template.
pub const MIN_DESCRIPTION_CHARS: usize = 20;

const RU_MONTHS: &str =
    "января|февраля|марта|апреля|мая|июня|июля|августа|сентября|октября|ноября|декабря";

/// Noise removed from description text, applied in order.
static CLEANUP_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\s+".to_string(), " "),
        (r"(?i)читать\s*(?:далее|подробнее|больше|полностью)".to_string(), ""),
        (r"(?i)подробнее\s*>>".to_string(), ""),
        (r"(?i)read\s+more".to_string(), ""),
        (format!(r"(?i)\d{{1,2}}\s*(?:{RU_MONTHS})\s*\d{{4}}\s*(?:г\.?)?"), ""),
        (r"\d{1,2}\.\d{1,2}\.\d{4}".to_string(), ""),
        (r"\d{4}-\d{2}-\d{2}".to_string(), ""),
        (r"\s*\|\s*".to_string(), " "),
        (r"\s*-\s*$".to_string(), ""),
        (r"^\s*-\s*".to_string(), ""),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(&pattern).unwrap(), replacement))
    .collect()
});

static SENTENCE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());

fn compile(selectors: &[&str]) -> Vec<Selector> {
    selectors
        .iter()
        .map(|selector| Selector::parse(selector).unwrap())
        .collect()
}

pub static BLOCKS: LazyLock<Vec<Selector>> = LazyLock::new(|| compile(BLOCK_SELECTORS));
pub static TITLES: LazyLock<Vec<Selector>> = LazyLock::new(|| compile(TITLE_SELECTORS));
pub static LINKS: LazyLock<Vec<Selector>> = LazyLock::new(|| compile(LINK_SELECTORS));
pub static DESCRIPTIONS: LazyLock<Vec<Selector>> =
    LazyLock::new(|| compile(DESCRIPTION_SELECTORS));
pub static NEARBY_DESCRIPTIONS: LazyLock<Vec<Selector>> =
    LazyLock::new(|| compile(NEARBY_DESCRIPTION_SELECTORS));
pub static DATES: LazyLock<Vec<Selector>> = LazyLock::new(|| compile(DATE_SELECTORS));
pub static HEADINGS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(HEADING_SELECTOR).unwrap());
pub static CONTENT_LINKS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(CONTENT_LINK_SELECTOR).unwrap());
pub static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());

/// Heading or anchor text plausible as an article title.
pub fn is_valid_title(title: &str) -> bool {
    let trimmed = title.trim();
    (5..=200).contains(&char_len(trimmed))
        && contains_letter(trimmed)
        && !contains_any_word(trimmed, NAVIGATION_WORDS)
}

/// Link plausible as an article target.
pub fn is_valid_link(link: &str) -> bool {
    let trimmed = link.trim();
    !trimmed.is_empty()
        && !trimmed.starts_with('#')
        && !contains_any_word(trimmed, &["javascript:", "mailto:"])
}

/// Strips call-to-action phrases, embedded dates and separators.
pub fn clean_description(text: &str) -> String {
    let cleaned = CLEANUP_PATTERNS
        .iter()
        .fold(text.to_string(), |acc, (pattern, replacement)| {
            pattern.replace_all(&acc, *replacement).into_owned()
        });

    collapse_whitespace(&cleaned)
}

/// Joins up to the first two meaningful sentences of `text`.
///
/// Sentences of 10 characters or fewer, digit-only fragments and read-more
/// prompts are skipped. The result ends with a period; `None` when no
/// sentence qualifies.
pub fn summarize_sentences(text: &str) -> Option<String> {
    let sentences: Vec<&str> = SENTENCE_BREAK
        .split(text)
        .map(str::trim)
        .filter(|sentence| {
            char_len(sentence) > 10
                && !contains_any_word(sentence, READ_MORE_MARKERS)
                && !sentence.chars().all(|c| c.is_ascii_digit())
        })
        .take(2)
        .collect();

    if sentences.is_empty() {
        return None;
    }

    let mut summary = sentences.join(". ");
    if !summary.ends_with('.') {
        summary.push('.');
    }
    Some(summary)
}

/// Description synthesized from keywords in the title.
pub fn description_from_title(title: &str) -> String {
    let lower = title.to_lowercase();

    DESCRIPTION_TEMPLATES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map_or_else(
            || format!("Подробная статья на тему: {title}"),
            |(_, template)| (*template).to_string(),
        )
}
