use rw_core::{Article, ArticleKind};

/// Which slice of the loaded set the listing shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Original,
    Updated,
}

impl Filter {
    pub fn matches(&self, article: &Article) -> bool {
        match self {
            Filter::All => true,
            Filter::Original => article.kind == ArticleKind::Original,
            Filter::Updated => article.kind == ArticleKind::Updated,
        }
    }
}

/// Badge counts over the unfiltered set, so switching the filter never
/// changes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterCounts {
    pub all: usize,
    pub original: usize,
    pub updated: usize,
}

/// What the listing renders: the matching subsequence plus the badge counts.
#[derive(Debug)]
pub struct FilteredView<'a> {
    pub articles: Vec<&'a Article>,
    pub counts: FilterCounts,
}

pub fn counts(articles: &[Article]) -> FilterCounts {
    let original = articles.iter().filter(|a| a.is_original()).count();
    FilterCounts {
        all: articles.len(),
        original,
        updated: articles.len() - original,
    }
}

pub fn filtered<'a>(articles: &'a [Article], filter: Filter) -> Vec<&'a Article> {
    articles.iter().filter(|a| filter.matches(a)).collect()
}

pub fn project(articles: &[Article], filter: Filter) -> FilteredView<'_> {
    FilteredView {
        articles: filtered(articles, filter),
        counts: counts(articles),
    }
}
