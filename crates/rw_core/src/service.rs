use async_trait::async_trait;

use crate::types::{Article, ScrapeOutcome};
use crate::Result;

/// The four remote operations the orchestration layer drives. Every call is a
/// single request/response exchange with no implicit retries and no local
/// side effects.
#[async_trait]
pub trait ArticleService: Send + Sync {
    /// Fetch every article the backend knows about. An empty list is a valid
    /// result, not an error.
    async fn list_articles(&self) -> Result<Vec<Article>>;

    /// Fetch a single article by id.
    async fn get_article(&self, id: i64) -> Result<Article>;

    /// Run the rewrite pipeline for an article, returning the newly created
    /// `updated` entity. The source article is left untouched.
    async fn rewrite(&self, id: i64) -> Result<Article>;

    /// Ingest fresh articles, skipping sources already known by URL.
    async fn scrape(&self, count: Option<u32>) -> Result<ScrapeOutcome>;
}
