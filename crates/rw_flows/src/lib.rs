pub mod batch;
pub mod detail;
pub mod listing;
pub mod view;

pub use batch::{BatchReport, BatchRewriter, RewriteFailure, RewriteSuccess};
pub use detail::{DetailScreen, DetailState};
pub use listing::{ListingScreen, ListingState};
pub use view::{Filter, FilterCounts, FilteredView};

pub mod prelude {
    pub use rw_core::{Article, ArticleKind, ArticleService, Error, Result};

    pub use crate::batch::BatchRewriter;
    pub use crate::detail::DetailScreen;
    pub use crate::listing::ListingScreen;
    pub use crate::view::Filter;
}
