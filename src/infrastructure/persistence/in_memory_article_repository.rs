//! Process-local article storage used when no database is configured.

use async_trait::async_trait;
use std::cmp::Reverse;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::Article;
use crate::domain::repositories::ArticleRepository;
use crate::error::AppError;

struct Store {
    articles: Vec<Article>,
    next_id: i64,
}

/// Article repository kept in memory for the process lifetime.
///
/// Behaves like [`super::PgArticleRepository`]: saves replace the whole set,
/// ids are assigned sequentially and reads are ordered newest first.
pub struct InMemoryArticleRepository {
    store: RwLock<Store>,
}

impl InMemoryArticleRepository {
    pub fn new() -> Self {
        debug!("Using InMemoryArticleRepository (no database configured)");
        Self {
            store: RwLock::new(Store {
                articles: Vec::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryArticleRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Canonical timestamps sort lexicographically; ties keep id order.
fn newest_first(mut articles: Vec<Article>) -> Vec<Article> {
    articles.sort_by_key(|article| (Reverse(article.date().to_string()), article.id()));
    articles
}

#[async_trait]
impl ArticleRepository for InMemoryArticleRepository {
    async fn find_all(&self) -> Result<Vec<Article>, AppError> {
        let store = self.store.read().await;
        Ok(newest_first(store.articles.clone()))
    }

    async fn save_all(&self, articles: Vec<Article>) -> Result<Vec<Article>, AppError> {
        let mut store = self.store.write().await;

        let mut saved = Vec::with_capacity(articles.len());
        for article in articles {
            let id = store.next_id;
            store.next_id += 1;
            saved.push(article.with_id(id));
        }

        store.articles = saved.clone();
        Ok(saved)
    }

    async fn clear(&self) -> Result<(), AppError> {
        self.store.write().await.articles.clear();
        Ok(())
    }

    async fn find_by_search_query(&self, query: &str) -> Result<Vec<Article>, AppError> {
        let store = self.store.read().await;
        let found = store
            .articles
            .iter()
            .filter(|article| article.contains_search_word(query))
            .cloned()
            .collect();

        Ok(newest_first(found))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::NewArticle;

    fn article(title: &str, date: &str) -> Article {
        Article::new(NewArticle {
            title: title.to_string(),
            link: "/blog/post".to_string(),
            description: "Короткое описание".to_string(),
            date: date.into(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_save_all_replaces_and_assigns_ids() {
        let repo = InMemoryArticleRepository::new();

        let first = repo
            .save_all(vec![article("Первая статья", "2023-01-01 00:00:00")])
            .await
            .unwrap();
        assert_eq!(first[0].id(), Some(1));

        let second = repo
            .save_all(vec![
                article("Вторая статья", "2023-02-01 00:00:00"),
                article("Третья статья", "2023-03-01 00:00:00"),
            ])
            .await
            .unwrap();
        assert_eq!(second[0].id(), Some(2));
        assert_eq!(second[1].id(), Some(3));

        let all = repo.find_all().await.unwrap();
        let titles: Vec<_> = all.iter().map(Article::title).collect();
        assert_eq!(titles, vec!["Третья статья", "Вторая статья"]);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_and_newest_first() {
        let repo = InMemoryArticleRepository::new();
        repo.save_all(vec![
            article("Rust для начинающих", "2022-05-01 10:00:00"),
            article("Новое в RUST 2024", "2024-01-10 09:00:00"),
            article("Python и данные", "2023-07-01 12:00:00"),
        ])
        .await
        .unwrap();

        let found = repo.find_by_search_query("rust").await.unwrap();
        let titles: Vec<_> = found.iter().map(Article::title).collect();
        assert_eq!(titles, vec!["Новое в RUST 2024", "Rust для начинающих"]);
    }

    #[tokio::test]
    async fn test_clear() {
        let repo = InMemoryArticleRepository::new();
        repo.save_all(vec![article("Статья для удаления", "2023-01-01 00:00:00")])
            .await
            .unwrap();

        repo.clear().await.unwrap();

        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
