//! CLI administration tool for blog-parser.
//!
//! Runs the extraction pipeline and manages stored articles without going
//! through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Fetch the blog once and print the extracted articles
//! cargo run --bin admin -- parse
//!
//! # Parse, store and search
//! cargo run --bin admin -- search gpt
//!
//! # Show stored articles
//! cargo run --bin admin -- list
//!
//! # Remove stored articles
//! cargo run --bin admin -- clear
//!
//! # Probe the blog and show the circuit breaker
//! cargo run --bin admin -- circuit
//! ```
//!
//! # Environment Variables
//!
//! Same as the server, see `blog_parser::config`. Without `DATABASE_URL`,
//! `list` and `clear` operate on an empty in-memory store.

use blog_parser::application::services::ArticleService;
use blog_parser::config::{self, Config};
use blog_parser::domain::blog_parser::BlogParser;
use blog_parser::domain::entities::Article;
use blog_parser::server::{build_article_service, build_parser};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;

/// CLI tool for managing blog-parser.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and parse the blog once without storing anything
    Parse,

    /// Parse the blog, store all articles and print the matches
    Search {
        /// Word to look for in titles and descriptions
        word: String,
    },

    /// List stored articles
    List,

    /// Remove all stored articles
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Probe the blog and show the circuit breaker state
    Circuit,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env().context("Invalid configuration")?;

    match cli.command {
        Commands::Parse => handle_parse(&config).await?,
        Commands::Search { word } => handle_search(&service(&config).await?, &word).await?,
        Commands::List => handle_list(&service(&config).await?).await?,
        Commands::Clear { yes } => handle_clear(&service(&config).await?, yes).await?,
        Commands::Circuit => handle_circuit(&service(&config).await?).await,
    }

    Ok(())
}

async fn service(config: &Config) -> Result<ArticleService> {
    build_article_service(config)
        .await
        .context("Failed to initialize article service")
}

/// Runs the pipeline once and prints every article that validated.
async fn handle_parse(config: &Config) -> Result<()> {
    println!("{}", "🔎 Parse blog".bright_blue().bold());
    println!("  Source: {}", config.blog_url.cyan());
    println!();

    let parser = build_parser(config)?;
    let articles = parser
        .parse_articles()
        .await
        .context("Failed to parse blog")?;

    print_articles(&articles);
    Ok(())
}

async fn handle_search(service: &ArticleService, word: &str) -> Result<()> {
    println!(
        "{} {}",
        "🔎 Search".bright_blue().bold(),
        word.bright_white().bold()
    );
    println!();

    let outcome = service
        .search_articles(word)
        .await
        .map_err(|e| anyhow::anyhow!("Search failed: {}", e))?;

    print_articles(&outcome.articles);
    Ok(())
}

async fn handle_list(service: &ArticleService) -> Result<()> {
    println!("{}", "📋 Stored articles".bright_blue().bold());
    println!();

    let articles = service
        .get_articles()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list articles: {}", e))?;

    print_articles(&articles);
    Ok(())
}

async fn handle_clear(service: &ArticleService, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Clear stored articles".bright_blue().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Remove all stored articles?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .clear_articles()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to clear articles: {}", e))?;

    println!("{}", "✅ Articles removed".green().bold());
    Ok(())
}

async fn handle_circuit(service: &ArticleService) {
    println!("{}", "🔌 Source circuit".bright_blue().bold());
    println!();

    let status = service.source_status().await;
    let circuit = status.circuit;

    let availability = if status.available {
        "AVAILABLE".green()
    } else {
        "UNAVAILABLE".red()
    };
    let state = match circuit.circuit_state.as_str() {
        "CLOSED" => circuit.circuit_state.green(),
        "OPEN" => circuit.circuit_state.red(),
        _ => circuit.circuit_state.yellow(),
    };

    println!("  Source:    {}", circuit.url.cyan());
    println!("  Status:    {}", availability);
    println!("  Circuit:   {}", state);
    println!(
        "  Failures:  {}/{}",
        circuit.failures.to_string().bright_white().bold(),
        circuit.failure_threshold
    );
    if let Some(at) = circuit.last_failure_at {
        println!(
            "  Last failure: {}",
            at.format("%Y-%m-%d %H:%M:%S").to_string().bright_black()
        );
    }
    println!();
}

/// Prints articles as a table.
///
/// # Output Format
///
/// ```text
///   ID   Date                 Title
///   ─────────────────────────────────────────────────────────────────────────
///   1    2023-12-01 10:00:00  Введение в JavaScript
///        https://is-systems.org/blog/javascript-intro
/// ```
fn print_articles(articles: &[Article]) {
    if articles.is_empty() {
        println!("{}", "  No articles found".yellow());
        return;
    }

    println!(
        "  {:<4} {:<20} {}",
        "ID".bright_white().bold(),
        "Date".bright_white().bold(),
        "Title".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for article in articles {
        let id = article.id().map(|id| id.to_string()).unwrap_or_default();
        println!(
            "  {:<4} {:<20} {}",
            id.bright_black(),
            article.date().bright_black(),
            article.title().cyan()
        );
        println!("  {:<4} {}", "", article.link().bright_black());
    }

    println!();
    println!(
        "  Total: {}",
        articles.len().to_string().bright_white().bold()
    );
    println!();
}
