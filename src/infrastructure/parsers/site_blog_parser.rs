use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::domain::blog_parser::{BlogParser, SourceHealth};
use crate::domain::entities::{Article, ArticleDate, NewArticle};
use crate::domain::errors::ParseError;
use crate::infrastructure::extraction::{ContentExtractor, RawCandidate};
use crate::infrastructure::http::HtmlFetcher;
use crate::utils::url_normalizer::UrlNormalizer;

/// Title of the article returned when the page yields nothing usable.
pub const PLACEHOLDER_TITLE: &str = "Статьи блога IS Systems будут доступны после настройки парсера";

pub const PLACEHOLDER_DESCRIPTION: &str = "Парсер блога готов к работе. Возможно, структура сайта изменилась и требует дополнительной настройки селекторов.";

/// Extraction pipeline for one blog page: fetch, extract, normalize, validate.
pub struct SiteBlogParser {
    blog_url: String,
    fetcher: HtmlFetcher,
    extractor: ContentExtractor,
    normalizer: UrlNormalizer,
}

impl SiteBlogParser {
    pub fn new(
        blog_url: impl Into<String>,
        base_url: impl Into<String>,
        fetcher: HtmlFetcher,
    ) -> Self {
        let blog_url = blog_url.into();
        let normalizer = UrlNormalizer::new(base_url);

        info!(
            blog_url = %blog_url,
            base_url = normalizer.base_url(),
            "SiteBlogParser initialized"
        );

        Self {
            blog_url,
            fetcher,
            extractor: ContentExtractor::new(),
            normalizer,
        }
    }

    /// Converts an already fetched page into validated articles.
    ///
    /// Candidates that fail validation are dropped one by one. The result may be
    /// empty; the placeholder is added by [`BlogParser::parse_articles`].
    pub fn articles_from_html(&self, html: &str) -> Vec<Article> {
        let candidates = self.extractor.extract_articles(html);
        let total = candidates.len();

        let articles: Vec<Article> = candidates
            .into_iter()
            .filter_map(|candidate| self.build_article(candidate))
            .collect();

        info!(
            candidates = total,
            count = articles.len(),
            skipped = total - articles.len(),
            "Candidates validated"
        );
        articles
    }

    fn build_article(&self, candidate: RawCandidate) -> Option<Article> {
        let title = candidate.title;
        if !self.normalizer.is_valid(&candidate.link) {
            warn!(title = %title, link = %candidate.link, "Skipping candidate with unusable link");
            return None;
        }
        let link = self.normalizer.normalize(&candidate.link);

        let input = NewArticle {
            id: None,
            title: title.clone(),
            link,
            description: candidate.description,
            date: ArticleDate::from(candidate.date),
        };

        match Article::new(input) {
            Ok(article) => Some(article),
            Err(e) => {
                warn!(title = %title, error = %e, "Skipping invalid article candidate");
                None
            }
        }
    }

    fn placeholder(&self) -> Result<Article, ParseError> {
        Article::new(NewArticle {
            id: None,
            title: PLACEHOLDER_TITLE.to_string(),
            link: self.blog_url.clone(),
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            date: ArticleDate::Now,
        })
        .map_err(ParseError::extraction)
    }
}

#[async_trait]
impl BlogParser for SiteBlogParser {
    async fn parse_articles(&self) -> Result<Vec<Article>, ParseError> {
        info!(url = %self.blog_url, "Parsing blog");

        let html = self.fetcher.fetch(&self.blog_url).await.map_err(|e| {
            error!(url = %self.blog_url, error = %e, "Error parsing blog");
            ParseError::extraction(e)
        })?;

        let articles = self.articles_from_html(&html);
        if articles.is_empty() {
            warn!(url = %self.blog_url, "No valid articles extracted, returning placeholder");
            return Ok(vec![self.placeholder()?]);
        }

        info!(count = articles.len(), "Blog parsed");
        Ok(articles)
    }

    async fn is_source_available(&self) -> bool {
        self.fetcher.is_source_available(&self.blog_url).await
    }

    fn source_health(&self) -> SourceHealth {
        let snapshot = self.fetcher.circuit_snapshot();
        SourceHealth {
            url: self.blog_url.clone(),
            circuit_state: snapshot.state.as_str().to_string(),
            failures: snapshot.failures,
            failure_threshold: snapshot.failure_threshold,
            last_failure_at: snapshot.last_failure_at,
        }
    }

    fn reset_source_circuit(&self) {
        info!(url = %self.blog_url, "Resetting source circuit");
        self.fetcher.reset_circuit();
    }
}
