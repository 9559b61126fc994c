use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use rw_client::HttpArticleService;
use rw_core::{Article, ArticleKind, ArticleService, Error};

// Article id whose rewrite always fails, mimicking an exhausted upstream
// pipeline.
const POISONED_ID: i64 = 13;

struct Backend {
    articles: Mutex<Vec<Article>>,
    next_id: Mutex<i64>,
}

fn article(id: i64, title: &str, kind: ArticleKind) -> Article {
    Article {
        id,
        title: title.to_string(),
        content: format!("Content of {}.", title),
        source_url: match kind {
            ArticleKind::Original => Some(format!("https://example.com/blogs/{}/", id)),
            ArticleKind::Updated => None,
        },
        kind,
        references: Vec::new(),
    }
}

async fn list_articles(State(state): State<Arc<Backend>>) -> Json<Vec<Article>> {
    Json(state.articles.lock().await.clone())
}

async fn get_article(State(state): State<Arc<Backend>>, Path(id): Path<i64>) -> Response {
    match state.articles.lock().await.iter().find(|a| a.id == id) {
        Some(found) => Json(found.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn rewrite(State(state): State<Arc<Backend>>, Path(id): Path<i64>) -> Response {
    if id == POISONED_ID {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Failed to rewrite article: upstream quota exhausted" })),
        )
            .into_response();
    }

    let mut articles = state.articles.lock().await;
    let source = match articles.iter().find(|a| a.id == id) {
        Some(found) => found.clone(),
        None => return StatusCode::NOT_FOUND.into_response(),
    };

    let mut next_id = state.next_id.lock().await;
    let updated = Article {
        id: *next_id,
        title: format!("{} (Updated)", source.title),
        content: source.content,
        source_url: None,
        kind: ArticleKind::Updated,
        references: vec!["https://example.com/ref-1".to_string()],
    };
    *next_id += 1;
    articles.push(updated.clone());
    Json(updated).into_response()
}

async fn scrape(State(state): State<Arc<Backend>>) -> Json<serde_json::Value> {
    let mut articles = state.articles.lock().await;
    let mut next_id = state.next_id.lock().await;
    let source_url = "https://example.com/blogs/scraped/";

    let known = articles
        .iter()
        .any(|a| a.source_url.as_deref() == Some(source_url));
    let (added, skipped) = if known {
        (0, 1)
    } else {
        let mut scraped = article(*next_id, "Scraped", ArticleKind::Original);
        scraped.source_url = Some(source_url.to_string());
        *next_id += 1;
        articles.push(scraped);
        (1, 0)
    };

    Json(json!({
        "message": "Scraping completed",
        "scraped": added + skipped,
        "added": added,
        "skipped": skipped,
    }))
}

/// Bind the fake backend on an ephemeral port and return its base URL.
async fn spawn_backend(articles: Vec<Article>) -> String {
    let next_id = articles.iter().map(|a| a.id).max().unwrap_or(0) + 1;
    let state = Arc::new(Backend {
        articles: Mutex::new(articles),
        next_id: Mutex::new(next_id),
    });

    let app = Router::new()
        .route("/api/articles/", get(list_articles))
        .route("/api/articles/:id", get(get_article))
        .route("/api/articles/scrape", post(scrape))
        .route("/api/rewrite/:id", post(rewrite))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/api", addr)
}

#[tokio::test]
async fn lists_and_fetches_articles() {
    let base = spawn_backend(vec![
        article(1, "First", ArticleKind::Original),
        article(2, "Second", ArticleKind::Updated),
    ])
    .await;
    let service = HttpArticleService::new(&base).unwrap();

    let articles = service.list_articles().await.unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].kind, ArticleKind::Original);

    let single = service.get_article(2).await.unwrap();
    assert_eq!(single.title, "Second");
}

#[tokio::test]
async fn a_missing_article_maps_to_not_found() {
    let base = spawn_backend(vec![article(1, "Only", ArticleKind::Original)]).await;
    let service = HttpArticleService::new(&base).unwrap();

    let err = service.get_article(999).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(999)));
}

#[tokio::test]
async fn rewrite_returns_the_new_updated_entity() {
    let base = spawn_backend(vec![article(1, "Source", ArticleKind::Original)]).await;
    let service = HttpArticleService::new(&base).unwrap();

    let updated = service.rewrite(1).await.unwrap();
    assert_eq!(updated.kind, ArticleKind::Updated);
    assert_eq!(updated.title, "Source (Updated)");
    assert!(!updated.references.is_empty());

    // The original is still addressable afterwards.
    let source = service.get_article(1).await.unwrap();
    assert_eq!(source.title, "Source");
}

#[tokio::test]
async fn rewrite_errors_carry_the_backend_message() {
    let base = spawn_backend(vec![article(POISONED_ID, "Poisoned", ArticleKind::Original)]).await;
    let service = HttpArticleService::new(&base).unwrap();

    let err = service.rewrite(POISONED_ID).await.unwrap_err();
    match err {
        Error::Upstream(message) => assert!(message.contains("upstream quota exhausted")),
        other => panic!("expected an upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn scrape_reports_added_and_skipped_counts() {
    let base = spawn_backend(Vec::new()).await;
    let service = HttpArticleService::new(&base).unwrap();

    let first = service.scrape(None).await.unwrap();
    assert_eq!(first.added, 1);
    assert_eq!(first.skipped, 0);

    let second = service.scrape(None).await.unwrap();
    assert_eq!(second.added, 0);
    assert_eq!(second.skipped, 1);
    assert_eq!(second.scraped, second.added + second.skipped);
}

#[tokio::test]
async fn an_unreachable_backend_maps_to_a_connection_error() {
    // Nothing listens on port 9; the connect fails immediately.
    let service = HttpArticleService::new("http://127.0.0.1:9/api").unwrap();
    let err = service.list_articles().await.unwrap_err();
    assert!(matches!(err, Error::Connection(_)));
}
