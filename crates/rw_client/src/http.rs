use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use rw_core::{Article, ArticleService, Error, Result, ScrapeOutcome};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct ScrapeRequest {
    count: u32,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// `ArticleService` over the backend's HTTP API. One reqwest client per
/// service value, constructed explicitly so callers can inject it (or a fake)
/// wherever a service is needed.
#[derive(Debug)]
pub struct HttpArticleService {
    client: Client,
    base_url: Url,
}

impl HttpArticleService {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| Error::Connection(format!("invalid backend url {}: {}", base_url, e)))?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn map_transport(err: reqwest::Error) -> Error {
        if err.is_connect() || err.is_timeout() {
            Error::Connection(
                "cannot connect to backend server, please ensure the backend is running"
                    .to_string(),
            )
        } else {
            Error::Http(err)
        }
    }

    async fn get(&self, path: &str) -> Result<Response> {
        let url = self.endpoint(path);
        debug!("GET {}", url);
        self.client.get(&url).send().await.map_err(Self::map_transport)
    }

    /// Extract the backend's `{error}` body, falling back to the HTTP status
    /// when the body is missing or unreadable.
    async fn upstream_error(response: Response) -> Error {
        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(ErrorBody { error: Some(message) }) => Error::Upstream(message),
            _ => Error::Upstream(format!("rewrite failed with status {}", status)),
        }
    }
}

#[async_trait]
impl ArticleService for HttpArticleService {
    async fn list_articles(&self) -> Result<Vec<Article>> {
        let response = self.get("/articles/").await?;
        Ok(response.error_for_status()?.json().await?)
    }

    async fn get_article(&self, id: i64) -> Result<Article> {
        let response = self.get(&format!("/articles/{}", id)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(id));
        }
        Ok(response.error_for_status()?.json().await?)
    }

    async fn rewrite(&self, id: i64) -> Result<Article> {
        let url = self.endpoint(&format!("/rewrite/{}", id));
        debug!("POST {}", url);
        let response = self.client.post(&url).send().await.map_err(Self::map_transport)?;
        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }
        Ok(response.json().await?)
    }

    async fn scrape(&self, count: Option<u32>) -> Result<ScrapeOutcome> {
        let url = self.endpoint("/articles/scrape");
        debug!("POST {}", url);
        let request = self.client.post(&url);
        let request = match count {
            Some(count) => request.json(&ScrapeRequest { count }),
            None => request,
        };
        let response = request.send().await.map_err(Self::map_transport)?;
        Ok(response.error_for_status()?.json().await?)
    }
}
