use std::mem;
use std::sync::Arc;

use tracing::{error, info};

use rw_core::{Article, ArticleService};

const LOAD_ERROR: &str =
    "Unable to load this article. It may not exist or there was a connection issue.";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Ready {
        article: Article,
        /// A failed rewrite attaches here instead of replacing the article;
        /// dismissible without losing the reading context.
        rewrite_error: Option<String>,
    },
    Rewriting {
        article: Article,
    },
    Failed {
        message: String,
    },
}

/// Drives the single-article view. Load errors replace the view; rewrite
/// errors overlay it.
pub struct DetailScreen {
    service: Arc<dyn ArticleService>,
    state: DetailState,
}

impl DetailScreen {
    pub fn new(service: Arc<dyn ArticleService>) -> Self {
        Self {
            service,
            state: DetailState::Loading,
        }
    }

    /// Construct the screen and load an article in one step.
    pub async fn open(service: Arc<dyn ArticleService>, id: i64) -> Self {
        let mut screen = Self::new(service);
        screen.load(id).await;
        screen
    }

    pub fn state(&self) -> &DetailState {
        &self.state
    }

    /// The article currently on screen, if any.
    pub fn article(&self) -> Option<&Article> {
        match &self.state {
            DetailState::Ready { article, .. } | DetailState::Rewriting { article } => {
                Some(article)
            }
            _ => None,
        }
    }

    pub fn rewrite_error(&self) -> Option<&str> {
        match &self.state {
            DetailState::Ready { rewrite_error, .. } => rewrite_error.as_deref(),
            _ => None,
        }
    }

    pub async fn load(&mut self, id: i64) {
        self.state = DetailState::Loading;
        match self.service.get_article(id).await {
            Ok(article) => {
                self.state = DetailState::Ready {
                    article,
                    rewrite_error: None,
                }
            }
            Err(err) => {
                error!("Failed to fetch article {}: {}", id, err);
                self.state = DetailState::Failed {
                    message: LOAD_ERROR.to_string(),
                };
            }
        }
    }

    /// Rewrite the displayed article. On success the screen navigates to the
    /// newly created article and returns its id; on failure the previous
    /// article stays on screen, byte for byte, with the error attached.
    pub async fn rewrite(&mut self) -> Option<i64> {
        let article = match mem::replace(&mut self.state, DetailState::Loading) {
            DetailState::Ready { article, .. } => article,
            other => {
                self.state = other;
                return None;
            }
        };

        let source_id = article.id;
        self.state = DetailState::Rewriting { article };

        match self.service.rewrite(source_id).await {
            Ok(new_article) => {
                info!("✨ Created updated article #{}", new_article.id);
                let new_id = new_article.id;
                self.load(new_id).await;
                Some(new_id)
            }
            Err(err) => {
                error!("Failed to rewrite article {}: {}", source_id, err);
                let article = match mem::replace(&mut self.state, DetailState::Loading) {
                    DetailState::Rewriting { article } => article,
                    other => {
                        self.state = other;
                        return None;
                    }
                };
                self.state = DetailState::Ready {
                    article,
                    rewrite_error: Some(err.user_message()),
                };
                None
            }
        }
    }

    pub fn dismiss_rewrite_error(&mut self) {
        if let DetailState::Ready { rewrite_error, .. } = &mut self.state {
            *rewrite_error = None;
        }
    }
}
