#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use blog_parser::application::services::ArticleService;
use blog_parser::domain::blog_parser::{BlogParser, SourceHealth};
use blog_parser::domain::entities::{Article, NewArticle};
use blog_parser::domain::errors::ParseError;
use blog_parser::infrastructure::persistence::InMemoryArticleRepository;
use blog_parser::routes::router;
use blog_parser::state::AppState;

pub const BLOG_URL: &str = "https://blog.test/blog";

pub fn create_test_article(title: &str, description: &str, date: &str) -> Article {
    Article::new(NewArticle {
        title: title.to_string(),
        link: format!("https://blog.test/blog/{}", title.len()),
        description: description.to_string(),
        date: date.into(),
        ..Default::default()
    })
    .unwrap()
}

pub fn sample_articles() -> Vec<Article> {
    vec![
        create_test_article(
            "ChatGPT в службе поддержки",
            "Как языковые модели отвечают клиентам",
            "2023-04-10 09:00:00",
        ),
        create_test_article(
            "Защита персональных данных",
            "Требования закона и практика GPT-ассистентов",
            "2023-06-01 12:30:00",
        ),
        create_test_article(
            "Запуск нового офиса",
            "Новости компании",
            "2022-11-20 08:00:00",
        ),
    ]
}

/// Blog parser stand-in with a fixed outcome.
pub struct StubParser {
    articles: Option<Vec<Article>>,
    circuit_state: &'static str,
    parses: AtomicU32,
    resets: AtomicU32,
}

impl StubParser {
    pub fn returning(articles: Vec<Article>) -> Self {
        Self {
            articles: Some(articles),
            circuit_state: "CLOSED",
            parses: AtomicU32::new(0),
            resets: AtomicU32::new(0),
        }
    }

    /// Fails every parse, as a blog behind an open circuit would.
    pub fn unavailable() -> Self {
        Self {
            articles: None,
            circuit_state: "OPEN",
            parses: AtomicU32::new(0),
            resets: AtomicU32::new(0),
        }
    }

    pub fn parses(&self) -> u32 {
        self.parses.load(Ordering::SeqCst)
    }

    pub fn resets(&self) -> u32 {
        self.resets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BlogParser for StubParser {
    async fn parse_articles(&self) -> Result<Vec<Article>, ParseError> {
        self.parses.fetch_add(1, Ordering::SeqCst);
        self.articles.clone().ok_or_else(|| {
            ParseError::extraction("Circuit breaker is OPEN - service temporarily unavailable")
        })
    }

    async fn is_source_available(&self) -> bool {
        self.articles.is_some()
    }

    fn source_health(&self) -> SourceHealth {
        let open = self.circuit_state == "OPEN" && self.resets() == 0;
        SourceHealth {
            url: BLOG_URL.to_string(),
            circuit_state: if open { "OPEN" } else { "CLOSED" }.to_string(),
            failures: if open { 5 } else { 0 },
            failure_threshold: 5,
            last_failure_at: None,
        }
    }

    fn reset_source_circuit(&self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn create_test_state(parser: Arc<StubParser>) -> AppState {
    let repository = Arc::new(InMemoryArticleRepository::new());
    AppState::new(Arc::new(ArticleService::new(repository, parser)))
}

pub fn create_test_server(parser: Arc<StubParser>) -> TestServer {
    TestServer::new(router(create_test_state(parser))).unwrap()
}
