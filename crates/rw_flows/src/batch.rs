use std::sync::Arc;

use tracing::{error, info};

use rw_core::{Article, ArticleService, Error, Result};

/// One successfully rewritten target: the source id and the new entity the
/// backend created for it.
#[derive(Debug, Clone)]
pub struct RewriteSuccess {
    pub source_id: i64,
    pub article: Article,
}

#[derive(Debug, Clone)]
pub struct RewriteFailure {
    pub source_id: i64,
    pub message: String,
}

/// Outcome of a batch run. Every target was attempted exactly once.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<RewriteSuccess>,
    pub failed: Vec<RewriteFailure>,
}

impl BatchReport {
    pub fn attempted(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }
}

/// Non-interactive driver: resolves a target set and rewrites it one article
/// at a time. Rewrites stay sequential to bound load on the shared downstream
/// pipeline and keep per-item log ordering deterministic.
pub struct BatchRewriter {
    service: Arc<dyn ArticleService>,
}

impl BatchRewriter {
    pub fn new(service: Arc<dyn ArticleService>) -> Self {
        Self { service }
    }

    /// Resolve the target set without touching the rewrite pipeline.
    ///
    /// An explicit selector must parse as an integer and match a fetched id;
    /// it bypasses the originals-only filter. With no selector the target set
    /// is every original article.
    pub async fn select_targets(&self, selector: Option<&str>) -> Result<Vec<Article>> {
        let articles = self.service.list_articles().await?;
        if articles.is_empty() {
            return Err(Error::EmptyCorpus);
        }

        match selector {
            Some(raw) => {
                let id: i64 = raw
                    .trim()
                    .parse()
                    .map_err(|_| Error::InvalidSelector(raw.to_string()))?;
                let target = articles
                    .into_iter()
                    .find(|article| article.id == id)
                    .ok_or(Error::SelectorNotFound(id))?;
                Ok(vec![target])
            }
            None => {
                let originals: Vec<Article> = articles
                    .into_iter()
                    .filter(|article| article.is_original())
                    .collect();
                if originals.is_empty() {
                    return Err(Error::NothingToRewrite);
                }
                Ok(originals)
            }
        }
    }

    /// Rewrite every target. A failed item is recorded against its id and the
    /// batch moves on; only target selection can abort the run.
    pub async fn run(&self, selector: Option<&str>) -> Result<BatchReport> {
        let targets = self.select_targets(selector).await?;
        info!("📝 Rewriting {} article(s)", targets.len());

        let mut report = BatchReport::default();
        for target in targets {
            info!("📰 Rewriting article #{}: {:?}", target.id, target.title);
            match self.service.rewrite(target.id).await {
                Ok(article) => {
                    info!("✨ Created updated article #{}: {:?}", article.id, article.title);
                    if !article.references.is_empty() {
                        info!("🔗 References:");
                        for reference in &article.references {
                            info!("  - {}", reference);
                        }
                    }
                    report.succeeded.push(RewriteSuccess {
                        source_id: target.id,
                        article,
                    });
                }
                Err(err) => {
                    error!("Failed to rewrite article #{}: {}", target.id, err);
                    report.failed.push(RewriteFailure {
                        source_id: target.id,
                        message: err.user_message(),
                    });
                }
            }
        }

        info!(
            "✅ Batch complete: {} succeeded, {} failed",
            report.succeeded.len(),
            report.failed.len()
        );
        Ok(report)
    }
}
