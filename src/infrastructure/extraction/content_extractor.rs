use std::collections::HashSet;

use scraper::{ElementRef, Html};

use super::date_parser::DateParser;
use super::proximity::{
    Area, closest_anchor, find, href, is_ancestor_or_self, parent_element, proximity_areas,
    text_of,
};
use super::rules::{
    self, ANCHOR, BLOCKS, CONTENT_LINKS, DATES, DESCRIPTIONS, HEADINGS, LINKS,
    MIN_DESCRIPTION_CHARS, NEARBY_DESCRIPTIONS, TITLES,
};
use crate::domain::text::{char_len, collapse_whitespace, contains_letter};

/// Unvalidated article fields as found in the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCandidate {
    pub title: String,
    pub link: String,
    pub description: String,
    pub date: Option<String>,
}

/// Extraction strategy; see [`STRATEGY_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Structural block selectors with per-field sub-cascades.
    SelectorCascade,
    /// Headings that look like titles, with a link found nearby.
    Headers,
    /// Anchors pointing at blog/post/article/news paths.
    Links,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Self::SelectorCascade => "selector_cascade",
            Self::Headers => "headers",
            Self::Links => "links",
        }
    }
}

/// Strategies in priority order. The first one that yields any candidate wins;
/// results are never merged across strategies.
pub const STRATEGY_ORDER: [Strategy; 3] =
    [Strategy::SelectorCascade, Strategy::Headers, Strategy::Links];

/// Turns raw HTML into article candidates.
///
/// Works on a parsed [`Html`] tree that never leaves the calling function, so the
/// extractor can be used from async code without holding the tree across an await.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContentExtractor {
    dates: DateParser,
}

impl ContentExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the strategy cascade and enriches short descriptions.
    ///
    /// Returns an empty list when no strategy finds anything.
    pub fn extract_articles(&self, html: &str) -> Vec<RawCandidate> {
        let document = Html::parse_document(html);

        let found = STRATEGY_ORDER.iter().find_map(|&strategy| {
            let candidates = self.run(strategy, &document);
            tracing::debug!(
                strategy = strategy.name(),
                count = candidates.len(),
                "Strategy finished"
            );
            (!candidates.is_empty()).then_some((strategy, candidates))
        });

        match found {
            Some((strategy, candidates)) => {
                tracing::info!(
                    strategy = strategy.name(),
                    count = candidates.len(),
                    "Extracted article candidates"
                );
                enrich_descriptions(candidates)
            }
            None => {
                tracing::warn!("No article candidates found by any strategy");
                Vec::new()
            }
        }
    }

    /// Runs a single strategy without enrichment.
    pub fn extract_with(&self, strategy: Strategy, html: &str) -> Vec<RawCandidate> {
        let document = Html::parse_document(html);
        self.run(strategy, &document)
    }

    fn run(&self, strategy: Strategy, document: &Html) -> Vec<RawCandidate> {
        match strategy {
            Strategy::SelectorCascade => self.from_blocks(document),
            Strategy::Headers => dedupe_by_link(self.from_headers(document)),
            Strategy::Links => dedupe_by_link(self.from_links(document)),
        }
    }

    fn from_blocks(&self, document: &Html) -> Vec<RawCandidate> {
        BLOCKS
            .iter()
            .map(|selector| {
                dedupe_by_link(
                    document
                        .select(selector)
                        .filter_map(|block| self.candidate_from_block(block))
                        .collect(),
                )
            })
            .find(|candidates| !candidates.is_empty())
            .unwrap_or_default()
    }

    fn candidate_from_block(&self, block: ElementRef<'_>) -> Option<RawCandidate> {
        let title = block_title(block)?;
        let link = block_link(block)?;

        Some(RawCandidate {
            title,
            link,
            description: block_description(block),
            date: self.block_date(block),
        })
    }

    fn block_date(&self, block: ElementRef<'_>) -> Option<String> {
        for selector in DATES.iter() {
            let Some(found) = find(block, selector).next() else {
                continue;
            };

            let text = text_of(found);
            let text = text.trim();
            if !text.is_empty() {
                if let Some(date) = self
                    .dates
                    .parse(text)
                    .or_else(|| self.dates.extract_from_text(text))
                {
                    return Some(date);
                }
            }

            if let Some(date) = found
                .value()
                .attr("datetime")
                .and_then(|datetime| self.dates.parse(datetime))
            {
                return Some(date);
            }
        }

        self.dates.extract_from_text(&text_of(block))
    }

    fn from_headers(&self, document: &Html) -> Vec<RawCandidate> {
        document
            .select(&HEADINGS)
            .filter_map(|heading| {
                let title = collapse_whitespace(&text_of(heading));
                if !rules::is_valid_title(&title) {
                    return None;
                }

                let link = link_near(heading)?;
                let description = self.description_near(heading, heading);
                let date = self.date_near(heading).or_else(|| {
                    let context = parent_element(heading).map(text_of).unwrap_or_default();
                    self.dates
                        .extract_from_text(&format!("{context} {description}"))
                });

                Some(RawCandidate {
                    title,
                    link,
                    description,
                    date,
                })
            })
            .collect()
    }

    fn from_links(&self, document: &Html) -> Vec<RawCandidate> {
        document
            .select(&CONTENT_LINKS)
            .filter_map(|anchor| {
                let title = collapse_whitespace(&text_of(anchor));
                let link = href(anchor)?;
                if !rules::is_valid_title(&title) {
                    return None;
                }

                let context = parent_element(anchor).unwrap_or(anchor);
                let description = self.description_near(context, anchor);
                let date = self
                    .date_near(context)
                    .or_else(|| self.dates.extract_from_text(&description));

                Some(RawCandidate {
                    title,
                    link,
                    description,
                    date,
                })
            })
            .collect()
    }

    /// First qualifying description around `origin`.
    ///
    /// Elements containing `origin` or inside `title_element` are skipped so the
    /// title is never reused as its own description.
    fn description_near(&self, origin: ElementRef<'_>, title_element: ElementRef<'_>) -> String {
        for area in proximity_areas(origin) {
            for selector in NEARBY_DESCRIPTIONS.iter() {
                for found in area.select(selector) {
                    if is_ancestor_or_self(found, origin)
                        || is_ancestor_or_self(title_element, found)
                    {
                        continue;
                    }

                    let text = rules::clean_description(&text_of(found));
                    let len = char_len(&text);
                    if len <= 20 || len >= 1000 || !contains_letter(&text) {
                        continue;
                    }

                    if let Some(summary) = rules::summarize_sentences(&text)
                        && char_len(&summary) > 20
                    {
                        return summary;
                    }
                }
            }
        }

        String::new()
    }

    fn date_near(&self, origin: ElementRef<'_>) -> Option<String> {
        proximity_areas(origin)
            .iter()
            .map(Area::text)
            .find_map(|text| self.dates.extract_from_text(&text))
    }
}

fn block_title(block: ElementRef<'_>) -> Option<String> {
    for selector in TITLES.iter() {
        if let Some(found) = find(block, selector).next() {
            let title = collapse_whitespace(&text_of(found));
            if char_len(&title) > 5 {
                return Some(title);
            }
        }
    }

    text_of(block)
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .filter(|line| char_len(line) > 5)
        .map(collapse_whitespace)
}

fn block_link(block: ElementRef<'_>) -> Option<String> {
    LINKS
        .iter()
        .find_map(|selector| find(block, selector).next().and_then(href))
        .or_else(|| closest_anchor(block).and_then(href))
}

fn block_description(block: ElementRef<'_>) -> String {
    for selector in DESCRIPTIONS.iter() {
        let Some(found) = find(block, selector).next() else {
            continue;
        };

        let raw = text_of(found);
        let raw_len = char_len(raw.trim());
        if raw_len <= 10 || raw_len >= 500 {
            continue;
        }

        let cleaned = rules::clean_description(&raw);
        if char_len(&cleaned) > 10 {
            return cleaned;
        }
    }

    let all_text = rules::clean_description(&text_of(block));
    rules::summarize_sentences(&all_text)
        .filter(|summary| (11..500).contains(&char_len(summary)))
        .unwrap_or_default()
}

/// Nearest valid link: inside the element, an enclosing anchor, then the
/// proximity areas beyond the element itself.
fn link_near(element: ElementRef<'_>) -> Option<String> {
    let inside = find(element, &ANCHOR).filter_map(href).next();
    let enclosing = || closest_anchor(element).and_then(href);
    let around = || {
        proximity_areas(element)
            .iter()
            .skip(1)
            .find_map(|area| {
                area.select(&ANCHOR)
                    .into_iter()
                    .filter_map(href)
                    .find(|link| rules::is_valid_link(link))
            })
    };

    inside
        .filter(|link| rules::is_valid_link(link))
        .or_else(|| enclosing().filter(|link| rules::is_valid_link(link)))
        .or_else(around)
}

fn dedupe_by_link(candidates: Vec<RawCandidate>) -> Vec<RawCandidate> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|candidate| seen.insert(candidate.link.clone()))
        .collect()
}

/// Replaces missing or very short descriptions with a title-based one.
pub fn enrich_descriptions(candidates: Vec<RawCandidate>) -> Vec<RawCandidate> {
    candidates
        .into_iter()
        .map(|mut candidate| {
            if char_len(&candidate.description) < MIN_DESCRIPTION_CHARS {
                candidate.description = rules::description_from_title(&candidate.title);
            }
            candidate
        })
        .collect()
}
