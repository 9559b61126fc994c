use std::sync::Arc;

use tracing::{error, info, warn};

use rw_core::{Article, ArticleService};

use crate::view::{project, Filter, FilteredView};

const FETCH_ERROR: &str = "Unable to load articles. Please check your connection and try again.";
const SCRAPE_ERROR: &str = "Unable to scrape articles. Please check your connection and try again.";

/// Where the listing view currently is. Rewriting is not a state of this
/// machine, it belongs to the detail flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingState {
    Idle,
    Loading,
    Scraping,
    Ready,
    Failed { message: String },
}

/// Drives the listing view: fetches the article set, auto-scrapes an empty
/// store on first load, and projects the loaded set through a filter.
///
/// Triggers take `&mut self`, so a second trigger cannot start while one is
/// suspended mid-call; there are no queued-request semantics.
pub struct ListingScreen {
    service: Arc<dyn ArticleService>,
    state: ListingState,
    articles: Vec<Article>,
    filter: Filter,
}

impl ListingScreen {
    pub fn new(service: Arc<dyn ArticleService>) -> Self {
        Self {
            service,
            state: ListingState::Idle,
            articles: Vec::new(),
            filter: Filter::default(),
        }
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    /// The full loaded set, unfiltered.
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// The filtered projection of the loaded set. Counts are computed over
    /// the unfiltered set.
    pub fn view(&self) -> FilteredView<'_> {
        project(&self.articles, self.filter)
    }

    /// Fetch the article set. When the store turns out empty and
    /// `auto_scrape_if_empty` is set, issue exactly one scrape, swallow its
    /// outcome, and re-fetch exactly once: an empty result is a legitimate,
    /// displayable state and not worth blocking the view over.
    pub async fn load(&mut self, auto_scrape_if_empty: bool) {
        self.state = ListingState::Loading;

        let articles = match self.service.list_articles().await {
            Ok(articles) => articles,
            Err(err) => {
                error!("Failed to fetch articles: {}", err);
                self.state = ListingState::Failed {
                    message: FETCH_ERROR.to_string(),
                };
                return;
            }
        };

        if articles.is_empty() && auto_scrape_if_empty {
            self.state = ListingState::Scraping;
            match self.service.scrape(None).await {
                Ok(outcome) => info!(
                    "🕷️ Auto-scraped {} articles: {} added, {} skipped",
                    outcome.scraped, outcome.added, outcome.skipped
                ),
                Err(err) => warn!("Auto-scrape failed, showing what the store holds: {}", err),
            }
            self.fetch_into_ready().await;
            return;
        }

        self.replace_set(articles);
    }

    /// Explicit user-triggered scrape followed by a reload. Unlike the
    /// auto-scrape path, a failure here surfaces.
    pub async fn scrape(&mut self) {
        self.state = ListingState::Scraping;
        match self.service.scrape(None).await {
            Ok(outcome) => {
                info!(
                    "🕷️ Scraped {} articles: {} added, {} skipped",
                    outcome.scraped, outcome.added, outcome.skipped
                );
                self.fetch_into_ready().await;
            }
            Err(err) => {
                error!("Failed to scrape articles: {}", err);
                self.state = ListingState::Failed {
                    message: SCRAPE_ERROR.to_string(),
                };
            }
        }
    }

    /// Manual retry out of the failed state.
    pub async fn retry(&mut self) {
        if !matches!(self.state, ListingState::Failed { .. }) {
            return;
        }
        self.fetch_into_ready().await;
    }

    async fn fetch_into_ready(&mut self) {
        self.state = ListingState::Loading;
        match self.service.list_articles().await {
            Ok(articles) => self.replace_set(articles),
            Err(err) => {
                error!("Failed to fetch articles: {}", err);
                self.state = ListingState::Failed {
                    message: FETCH_ERROR.to_string(),
                };
            }
        }
    }

    fn replace_set(&mut self, articles: Vec<Article>) {
        // The loaded set is wholly replaced, never patched.
        self.articles = articles;
        self.state = ListingState::Ready;
    }
}
