use std::sync::Arc;

use rw_core::{ArticleService, Result};

pub mod http;
pub mod memory;

pub use http::HttpArticleService;
pub use memory::MemoryArticleService;

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000/api";

/// Build a service for the given backend address, or the in-process memory
/// backend when `offline` is set.
pub fn create_service(base_url: &str, offline: bool) -> Result<Arc<dyn ArticleService>> {
    if offline {
        Ok(Arc::new(MemoryArticleService::with_seed_articles()))
    } else {
        Ok(Arc::new(HttpArticleService::new(base_url)?))
    }
}

pub mod prelude {
    pub use rw_core::{Article, ArticleKind, ArticleService, Error, Result, ScrapeOutcome};

    pub use crate::{create_service, HttpArticleService, MemoryArticleService};
}
