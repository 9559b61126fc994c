use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot connect to backend server: {0}")]
    Connection(String),

    #[error("article {0} not found")]
    NotFound(i64),

    #[error("invalid article id {0:?}, pass a numeric id or omit it to process all originals")]
    InvalidSelector(String),

    #[error("article {0} is not present in the backend")]
    SelectorNotFound(i64),

    #[error("no articles available, run a scrape first")]
    EmptyCorpus,

    #[error("no original articles left to rewrite, only updated articles exist")]
    NothingToRewrite,

    #[error("rewrite pipeline failed: {0}")]
    Upstream(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// The message a view should surface for this error. `Upstream` and
    /// `Connection` already carry wording extracted for the user, the rest
    /// fall back to the Display impl.
    pub fn user_message(&self) -> String {
        match self {
            Error::Upstream(message) | Error::Connection(message) => message.clone(),
            other => other.to_string(),
        }
    }
}
