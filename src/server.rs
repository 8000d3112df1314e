//! HTTP server initialization and runtime setup.
//!
//! Handles storage selection, blog parser wiring, and Axum server lifecycle.

use crate::application::services::ArticleService;
use crate::config::Config;
use crate::domain::blog_parser::BlogParser;
use crate::domain::repositories::ArticleRepository;
use crate::infrastructure::http::HtmlFetcher;
use crate::infrastructure::parsers::SiteBlogParser;
use crate::infrastructure::persistence::{InMemoryArticleRepository, PgArticleRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Connects to PostgreSQL and applies pending migrations.
///
/// # Errors
///
/// Returns an error if the connection or a migration fails.
pub async fn connect_database(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    Ok(pool)
}

/// Selects the article store: PostgreSQL when configured, memory otherwise.
///
/// # Errors
///
/// Returns an error if a database is configured but unreachable.
pub async fn build_repository(config: &Config) -> Result<Arc<dyn ArticleRepository>> {
    match &config.database_url {
        Some(database_url) => {
            let pool = connect_database(config, database_url).await?;
            tracing::info!("Storage: PostgreSQL");
            Ok(Arc::new(PgArticleRepository::new(Arc::new(pool))))
        }
        None => {
            tracing::info!("Storage: in-memory (DATABASE_URL not set)");
            Ok(Arc::new(InMemoryArticleRepository::new()))
        }
    }
}

/// Builds the blog parser with its fetcher, retry policy and circuit breaker.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
pub fn build_parser(config: &Config) -> Result<Arc<dyn BlogParser>> {
    let fetcher = HtmlFetcher::new(config.fetcher_options())?;
    Ok(Arc::new(SiteBlogParser::new(
        config.blog_url.clone(),
        config.blog_base_url.clone(),
        fetcher,
    )))
}

/// Wires the article service from configuration.
///
/// # Errors
///
/// See [`build_repository`] and [`build_parser`].
pub async fn build_article_service(config: &Config) -> Result<ArticleService> {
    let repository = build_repository(config).await?;
    let parser = build_parser(config)?;
    Ok(ArticleService::new(repository, parser))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations (or in-memory fallback)
/// - Blog parser with retry and circuit breaker
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let article_service = Arc::new(build_article_service(&config).await?);
    let state = AppState::new(article_service);

    let app = app_router(state, config.behind_proxy)?;

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
