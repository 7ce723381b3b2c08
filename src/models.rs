// src/models.rs

use serde::{Deserialize, Serialize};

/// A single news or video item as delivered by the backend. Items are value
/// objects: the client renders them but never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub source: String,
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category: String,
    pub published_at: String,
    /// "positive", "negative" or "neutral" when the backend scored the item.
    #[serde(default)]
    pub sentiment: Option<String>,
    /// -1.0 to 1.0, present only alongside `sentiment`.
    #[serde(default)]
    pub sentiment_score: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub news: Vec<NewsItem>,
    pub query: String,
    pub total: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendsResponse {
    pub success: bool,
    pub category: String,
    pub news: Vec<NewsItem>,
    pub total: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedResponse {
    pub success: bool,
    pub news: Vec<NewsItem>,
    pub categories: Vec<String>,
    pub total: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// One entry of the conversation log, also sent back as history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String, // "user" or "assistant"
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        ChatMessage {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == "user"
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DigestResponse {
    pub digest: String,
    pub headlines: Vec<String>,
    pub generated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RelatedResponse {
    pub related: Vec<NewsItem>,
    pub query: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub original_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
    #[serde(default)]
    pub source_language: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VideosResponse {
    pub success: bool,
    pub videos: Vec<NewsItem>,
    pub total: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn news_item_optional_fields_default_to_none() {
        let json = r#"{
            "id": "n1",
            "title": "Rust 2.0 announced",
            "summary": "Not really.",
            "source": "The Register",
            "url": "https://example.com/rust",
            "category": "Technology",
            "published_at": "2025-06-01T12:00:00Z"
        }"#;
        let item: NewsItem = serde_json::from_str(json).unwrap();
        assert!(item.image_url.is_none());
        assert!(item.sentiment.is_none());
        assert!(item.sentiment_score.is_none());
    }

    #[test]
    fn news_item_keeps_sentiment_when_present() {
        let json = r#"{
            "id": "n2",
            "title": "Markets rally",
            "summary": "Stocks up.",
            "source": "Wire",
            "url": "https://example.com/markets",
            "image_url": "https://example.com/markets.jpg",
            "category": "Finance",
            "published_at": "2025-06-01T09:00:00Z",
            "sentiment": "positive",
            "sentiment_score": 0.62
        }"#;
        let item: NewsItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.sentiment.as_deref(), Some("positive"));
        assert_eq!(item.sentiment_score, Some(0.62));
    }

    #[test]
    fn chat_response_sources_are_optional() {
        let resp: ChatResponse = serde_json::from_str(r#"{"response": "hello"}"#).unwrap();
        assert!(resp.sources.is_none());
    }
}
