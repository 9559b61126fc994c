use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use rw_core::{Article, ArticleKind, ArticleService, Error, Result, ScrapeOutcome};

/// How many articles one scrape pass ingests unless the caller asks otherwise.
const SCRAPE_BATCH: u32 = 5;

/// The canned source pool the memory backend "scrapes" from.
const SOURCE_POOL: &[(&str, &str, &str)] = &[
    (
        "How Chatbots Cut Support Costs",
        "Support teams spend most of their time answering the same dozen questions. \
         A well-trained chatbot resolves those before a human ever sees them.",
        "https://beyondchats.com/blogs/chatbot-support-costs/",
    ),
    (
        "Lead Qualification on Autopilot",
        "Not every visitor is a buyer. Scoring conversations as they happen lets the \
         sales team focus on the ones that are.",
        "https://beyondchats.com/blogs/lead-qualification-autopilot/",
    ),
    (
        "Why Response Time Decides Conversions",
        "A reply within five minutes keeps a prospect warm. A reply within five hours \
         is a reply to someone who already bought elsewhere.",
        "https://beyondchats.com/blogs/response-time-conversions/",
    ),
    (
        "Designing Conversation Flows That Convert",
        "The best flows read like a helpful colleague, not a phone menu. Short turns, \
         one question at a time, and a clear way out to a human.",
        "https://beyondchats.com/blogs/conversation-flows/",
    ),
    (
        "Measuring Chatbot ROI Honestly",
        "Deflection rate alone flatters the bot. Pair it with resolution quality and \
         customer effort before calling the rollout a win.",
        "https://beyondchats.com/blogs/measuring-chatbot-roi/",
    ),
    (
        "Handing Off to a Human Gracefully",
        "The handoff is where trust is won or lost. Carry the transcript over so the \
         customer never repeats themselves.",
        "https://beyondchats.com/blogs/graceful-human-handoff/",
    ),
];

#[derive(Default)]
struct MemoryStore {
    articles: Vec<Article>,
    next_id: i64,
    failing_rewrites: HashMap<i64, String>,
}

impl MemoryStore {
    fn allocate_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// An in-process backend with the same observable semantics as the real one:
/// scrape skips sources already known by URL, rewrite appends a new `updated`
/// article and leaves the source untouched. Used by `--offline` runs and as a
/// test double for the flows.
pub struct MemoryArticleService {
    store: RwLock<MemoryStore>,
}

impl MemoryArticleService {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(MemoryStore {
                next_id: 1,
                ..MemoryStore::default()
            }),
        }
    }

    /// Start from an already-populated corpus.
    pub fn with_articles(articles: Vec<Article>) -> Self {
        let next_id = articles.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        Self {
            store: RwLock::new(MemoryStore {
                articles,
                next_id,
                failing_rewrites: HashMap::new(),
            }),
        }
    }

    /// Start with the full source pool already ingested as originals.
    pub fn with_seed_articles() -> Self {
        let articles = SOURCE_POOL
            .iter()
            .enumerate()
            .map(|(i, (title, content, source_url))| Article {
                id: i as i64 + 1,
                title: (*title).to_string(),
                content: (*content).to_string(),
                source_url: Some((*source_url).to_string()),
                kind: ArticleKind::Original,
                references: Vec::new(),
            })
            .collect();
        Self::with_articles(articles)
    }

    /// Make every rewrite of `id` fail with the given pipeline message.
    pub fn fail_rewrite(mut self, id: i64, message: impl Into<String>) -> Self {
        self.store
            .get_mut()
            .failing_rewrites
            .insert(id, message.into());
        self
    }
}

impl Default for MemoryArticleService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ArticleService for MemoryArticleService {
    async fn list_articles(&self) -> Result<Vec<Article>> {
        Ok(self.store.read().await.articles.clone())
    }

    async fn get_article(&self, id: i64) -> Result<Article> {
        self.store
            .read()
            .await
            .articles
            .iter()
            .find(|article| article.id == id)
            .cloned()
            .ok_or(Error::NotFound(id))
    }

    async fn rewrite(&self, id: i64) -> Result<Article> {
        let mut store = self.store.write().await;
        if let Some(message) = store.failing_rewrites.get(&id) {
            return Err(Error::Upstream(message.clone()));
        }
        let source = store
            .articles
            .iter()
            .find(|article| article.id == id)
            .cloned()
            .ok_or(Error::NotFound(id))?;

        // Reference links come from the other stored originals, the same
        // fallback the real pipeline uses when search yields nothing.
        let references: Vec<String> = store
            .articles
            .iter()
            .filter(|a| a.id != id && a.kind == ArticleKind::Original)
            .filter_map(|a| a.source_url.clone())
            .take(2)
            .collect();

        let article = Article {
            id: store.allocate_id(),
            title: format!("{} (Updated)", source.title),
            content: source.content,
            source_url: None,
            kind: ArticleKind::Updated,
            references,
        };
        debug!("memory backend created updated article #{}", article.id);
        store.articles.push(article.clone());
        Ok(article)
    }

    async fn scrape(&self, count: Option<u32>) -> Result<ScrapeOutcome> {
        let mut store = self.store.write().await;
        let batch = count.unwrap_or(SCRAPE_BATCH) as usize;

        let mut added = 0;
        let mut skipped = 0;
        for (title, content, source_url) in SOURCE_POOL.iter().take(batch) {
            let known = store
                .articles
                .iter()
                .any(|a| a.source_url.as_deref() == Some(*source_url));
            if known {
                skipped += 1;
                continue;
            }
            let id = store.allocate_id();
            store.articles.push(Article {
                id,
                title: (*title).to_string(),
                content: (*content).to_string(),
                source_url: Some((*source_url).to_string()),
                kind: ArticleKind::Original,
                references: Vec::new(),
            });
            added += 1;
        }

        Ok(ScrapeOutcome {
            message: "Scraping completed".to_string(),
            scraped: added + skipped,
            added,
            skipped,
        })
    }
}
