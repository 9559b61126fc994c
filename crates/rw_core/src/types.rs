use serde::{Deserialize, Serialize};

/// How an article came to exist: scraped as-is, or produced by a rewrite.
/// Serialized as the backend's `type` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleKind {
    Original,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub source_url: Option<String>,
    #[serde(rename = "type")]
    pub kind: ArticleKind,
    /// Reference URLs, only carried by `updated` articles.
    #[serde(default)]
    pub references: Vec<String>,
}

impl Article {
    pub fn is_original(&self) -> bool {
        self.kind == ArticleKind::Original
    }
}

/// What one scrape pass did. Sources already known by URL are counted as
/// skipped, so `added + skipped = scraped`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeOutcome {
    pub message: String,
    pub scraped: u32,
    pub added: u32,
    pub skipped: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_backend_article() {
        let json = r#"{
            "id": 3,
            "title": "Why Chatbots Matter",
            "content": "Some content.",
            "source_url": "https://beyondchats.com/blogs/why-chatbots-matter/",
            "type": "original",
            "references": []
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.id, 3);
        assert_eq!(article.kind, ArticleKind::Original);
        assert!(article.is_original());
        assert!(article.references.is_empty());
    }

    #[test]
    fn missing_references_default_to_empty() {
        let json = r#"{
            "id": 7,
            "title": "Why Chatbots Matter (Updated)",
            "content": "Rewritten content.",
            "source_url": null,
            "type": "updated"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.kind, ArticleKind::Updated);
        assert!(!article.is_original());
        assert!(article.references.is_empty());
        assert_eq!(article.source_url, None);
    }

    #[test]
    fn kind_uses_the_wire_tag() {
        let article = Article {
            id: 1,
            title: "T".to_string(),
            content: "C".to_string(),
            source_url: None,
            kind: ArticleKind::Updated,
            references: vec!["https://example.com/ref".to_string()],
        };

        let value = serde_json::to_value(&article).unwrap();
        assert_eq!(value["type"], "updated");
    }
}
