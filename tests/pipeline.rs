use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use blog_parser::domain::blog_parser::BlogParser;
use blog_parser::domain::errors::ParseError;
use blog_parser::infrastructure::http::{FetchError, FetcherOptions, HtmlFetcher, HttpTransport};
use blog_parser::infrastructure::parsers::{PLACEHOLDER_TITLE, SiteBlogParser};
use blog_parser::infrastructure::resilience::{CircuitBreakerConfig, RetryPolicy};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BLOG_PAGE: &str = r#"
<html>
  <body>
    <nav class="menu"><a href="/about">О компании</a></nav>
    <div class="news">
      <article class="widg_newsblock_element">
        <a class="widg_news_link" href="/blog/rust-async">Асинхронный Rust на практике</a>
        <div class="widg_news_short_doc">Разбираем tokio и отмену задач.</div>
        <div class="widg_news_pub_time">15 марта 2023 г. 14:30</div>
      </article>
      <article class="widg_newsblock_element">
        <a class="widg_news_link" href="/blog/postgres-indexes">Индексы PostgreSQL без боли</a>
        <div class="widg_news_short_doc">Когда btree не помогает.</div>
        <div class="widg_news_pub_time">02.04.2023</div>
      </article>
      <article class="widg_newsblock_element">
        <a class="widg_news_link" href="mailto:info@blog.test">Напишите нам письмо</a>
      </article>
    </div>
  </body>
</html>
"#;

fn options(max_attempts: u32, failure_threshold: u32) -> FetcherOptions {
    FetcherOptions {
        timeout: Duration::from_secs(2),
        retry: RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(10),
            max_delay: Duration::from_millis(10),
            backoff_multiplier: 1.0,
            jitter: false,
        },
        circuit: CircuitBreakerConfig {
            failure_threshold,
            recovery_timeout: Duration::from_secs(60),
        },
    }
}

async fn blog_server(body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(body),
        )
        .mount(&server)
        .await;
    server
}

fn site_parser(server: &MockServer, options: FetcherOptions) -> SiteBlogParser {
    let fetcher = HtmlFetcher::new(options).unwrap();
    SiteBlogParser::new(format!("{}/blog", server.uri()), server.uri(), fetcher)
}

#[tokio::test]
async fn test_blog_page_is_parsed_into_articles() {
    let server = blog_server(BLOG_PAGE).await;
    let parser = site_parser(&server, options(3, 5));

    let articles = parser.parse_articles().await.unwrap();

    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title(), "Асинхронный Rust на практике");
    assert_eq!(
        articles[0].link(),
        format!("{}/blog/rust-async", server.uri())
    );
    assert_eq!(articles[0].date(), "2023-03-15 14:30:00");
    assert_eq!(articles[1].title(), "Индексы PostgreSQL без боли");
    assert_eq!(articles[1].date(), "2023-04-02 00:00:00");
    assert!(articles.iter().all(|article| article.id().is_none()));
}

#[tokio::test]
async fn test_page_without_articles_yields_placeholder() {
    let server = blog_server("<html><body><p>Скоро здесь появятся статьи</p></body></html>").await;
    let parser = site_parser(&server, options(3, 5));

    let articles = parser.parse_articles().await.unwrap();

    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].title(), PLACEHOLDER_TITLE);
    assert_eq!(articles[0].link(), format!("{}/blog", server.uri()));
}

/// Transport whose host never resolves.
#[derive(Default)]
struct UnresolvableTransport {
    calls: AtomicU32,
}

#[async_trait]
impl HttpTransport for UnresolvableTransport {
    async fn get(&self, url: &str) -> Result<String, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(FetchError::DnsFailure {
            url: url.to_string(),
        })
    }
}

#[tokio::test]
async fn test_failures_open_the_source_circuit() {
    let transport = Arc::new(UnresolvableTransport::default());
    let fetcher = HtmlFetcher::with_transport(transport.clone(), options(3, 2));
    let parser = SiteBlogParser::new(
        "https://unreachable.invalid/blog",
        "https://unreachable.invalid",
        fetcher,
    );

    for _ in 0..2 {
        let err = parser.parse_articles().await.unwrap_err();
        assert!(matches!(err, ParseError::ExtractionFailure { .. }));
    }
    // DNS failures are not retried: one call per parse.
    assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    assert!(parser.source_health().is_open());

    let err = parser.parse_articles().await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Failed to parse blog: Circuit breaker is OPEN - service temporarily unavailable"
    );
    assert_eq!(transport.calls.load(Ordering::SeqCst), 2);

    parser.reset_source_circuit();
    let health = parser.source_health();
    assert_eq!(health.circuit_state, "CLOSED");
    assert_eq!(health.failures, 0);
}
