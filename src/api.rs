use crate::{
    config::get_config,
    constants::API_TIMEOUT_SECS,
    errors::{NewsflowError, NewsflowResult},
    logging::{log_api_call, ApiCallLog},
    models::{
        CategoriesResponse, ChatMessage, ChatResponse, DigestResponse, FeedResponse,
        RelatedResponse, SearchResponse, SummarizeResponse, TranslateResponse, TrendsResponse,
        VideosResponse,
    },
};
use chrono::Utc;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::time::{Duration, Instant};

/// Client for the NewsFlow REST backend. One method per backend operation;
/// every call is a single HTTP request with a fixed timeout. No retries, no
/// deduplication, no caching — calls are independent and idempotent from the
/// client's perspective.
#[derive(Debug, Clone)]
pub struct NewsApi {
    client: Client,
    base_url: String,
}

impl NewsApi {
    pub fn new(base_url: impl Into<String>) -> NewsflowResult<Self> {
        // The timeout is tuned for the slower AI-backed endpoints.
        let client = Client::builder()
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config() -> NewsflowResult<Self> {
        Self::new(get_config().api_base_url)
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Builds a URL with extra, percent-encoded path segments appended to the
    /// base path.
    fn url_with_segments(&self, segments: &[&str]) -> NewsflowResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| NewsflowError::InvalidUrl(e.to_string()))?;
        {
            let mut parts = url
                .path_segments_mut()
                .map_err(|_| NewsflowError::InvalidUrl(self.base_url.clone()))?;
            for segment in segments {
                parts.push(segment);
            }
        }
        Ok(url)
    }

    /// Logs the call and, for non-2xx responses, captures the HTTP status plus
    /// the backend's `detail` field when the body carries one. The error is
    /// otherwise propagated untouched; callers build the displayed message.
    async fn check(
        &self,
        endpoint: &str,
        started: Instant,
        response: Response,
    ) -> NewsflowResult<Response> {
        let status = response.status();
        log_api_call(&ApiCallLog {
            timestamp: Utc::now(),
            endpoint: endpoint.to_string(),
            response_status: status.as_u16(),
            response_time_ms: started.elapsed().as_millis(),
        });

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").and_then(Value::as_str).map(str::to_string));
        Err(NewsflowError::Api {
            status: status.as_u16(),
            detail,
        })
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        started: Instant,
        response: Response,
    ) -> NewsflowResult<T> {
        let response = self.check(endpoint, started, response).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn search_news(
        &self,
        query: &str,
        date: Option<&str>,
        categories: Option<&[String]>,
        limit: u32,
    ) -> NewsflowResult<SearchResponse> {
        let started = Instant::now();
        let payload = json!({
            "query": query,
            "date": date,
            "categories": categories,
            "limit": limit,
        });
        let response = self
            .client
            .post(self.endpoint("/news/search"))
            .json(&payload)
            .send()
            .await?;
        self.decode("/news/search", started, response).await
    }

    pub async fn get_trends(&self, category: &str, limit: u32) -> NewsflowResult<TrendsResponse> {
        let started = Instant::now();
        let url = self.url_with_segments(&["news", "trends", category])?;
        let response = self
            .client
            .get(url)
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;
        self.decode("/news/trends", started, response).await
    }

    pub async fn get_feed(
        &self,
        categories: &[String],
        limit: u32,
    ) -> NewsflowResult<FeedResponse> {
        let started = Instant::now();
        let response = self
            .client
            .get(self.endpoint("/news/feed"))
            .query(&[
                ("categories", categories.join(",")),
                ("limit", limit.to_string()),
            ])
            .send()
            .await?;
        self.decode("/news/feed", started, response).await
    }

    pub async fn get_categories(&self) -> NewsflowResult<CategoriesResponse> {
        let started = Instant::now();
        let response = self
            .client
            .get(self.endpoint("/news/categories"))
            .send()
            .await?;
        self.decode("/news/categories", started, response).await
    }

    pub async fn chat(
        &self,
        message: &str,
        history: &[ChatMessage],
    ) -> NewsflowResult<ChatResponse> {
        let started = Instant::now();
        let payload = json!({ "message": message, "history": history });
        let response = self
            .client
            .post(self.endpoint("/news/chat"))
            .json(&payload)
            .send()
            .await?;
        self.decode("/news/chat", started, response).await
    }

    pub async fn get_digest(
        &self,
        categories: Option<&[String]>,
    ) -> NewsflowResult<DigestResponse> {
        let started = Instant::now();
        let payload = json!({ "categories": categories });
        let response = self
            .client
            .post(self.endpoint("/news/digest"))
            .json(&payload)
            .send()
            .await?;
        self.decode("/news/digest", started, response).await
    }

    pub async fn get_related(&self, query: &str, limit: u32) -> NewsflowResult<RelatedResponse> {
        let started = Instant::now();
        let url = self.url_with_segments(&["news", "related", query])?;
        let response = self
            .client
            .get(url)
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;
        self.decode("/news/related", started, response).await
    }

    /// Summarizes an article or video by URL; the backend picks the right
    /// extractor.
    pub async fn summarize(&self, url: &str) -> NewsflowResult<SummarizeResponse> {
        let started = Instant::now();
        let payload = json!({ "url": url });
        let response = self
            .client
            .post(self.endpoint("/news/summarize"))
            .json(&payload)
            .send()
            .await?;
        self.decode("/news/summarize", started, response).await
    }

    pub async fn translate_text(
        &self,
        text: &str,
        target_language: &str,
    ) -> NewsflowResult<TranslateResponse> {
        let started = Instant::now();
        let payload = json!({ "text": text, "target_language": target_language });
        let response = self
            .client
            .post(self.endpoint("/news/translate"))
            .json(&payload)
            .send()
            .await?;
        self.decode("/news/translate", started, response).await
    }

    /// Returns the synthesized speech as raw audio bytes (audio/mpeg).
    pub async fn speak_text(&self, text: &str, language: &str) -> NewsflowResult<Vec<u8>> {
        let started = Instant::now();
        let payload = json!({ "text": text, "language": language });
        let response = self
            .client
            .post(self.endpoint("/news/speak"))
            .json(&payload)
            .send()
            .await?;
        let response = self.check("/news/speak", started, response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub async fn get_video_news(&self, query: &str, limit: u32) -> NewsflowResult<VideosResponse> {
        let started = Instant::now();
        let response = self
            .client
            .get(self.endpoint("/news/videos"))
            .query(&[("query", query.to_string()), ("limit", limit.to_string())])
            .send()
            .await?;
        self.decode("/news/videos", started, response).await
    }

    pub async fn get_trending_videos(&self, limit: u32) -> NewsflowResult<VideosResponse> {
        let started = Instant::now();
        let response = self
            .client
            .get(self.endpoint("/news/videos/trending"))
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;
        self.decode("/news/videos/trending", started, response).await
    }

    pub async fn get_videos_by_category(
        &self,
        category: &str,
        limit: u32,
    ) -> NewsflowResult<VideosResponse> {
        let started = Instant::now();
        let url = self.url_with_segments(&["news", "videos", "category", category])?;
        let response = self
            .client
            .get(url)
            .query(&[("limit", limit.to_string())])
            .send()
            .await?;
        self.decode("/news/videos/category", started, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        matchers::{body_partial_json, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn sample_item(id: &str) -> Value {
        json!({
            "id": id,
            "title": "Quantum chip breaks record",
            "summary": "A new qubit count record.",
            "source": "Science Daily",
            "url": "https://example.com/quantum",
            "category": "Science",
            "published_at": "2025-06-01T08:00:00Z"
        })
    }

    #[tokio::test]
    async fn feed_decodes_news_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news/feed"))
            .and(query_param("categories", "Technology,Science"))
            .and(query_param("limit", "25"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "news": [sample_item("a"), sample_item("b")],
                "categories": ["Technology", "Science"],
                "total": 2
            })))
            .mount(&server)
            .await;

        let api = NewsApi::new(server.uri()).unwrap();
        let categories = vec!["Technology".to_string(), "Science".to_string()];
        let feed = api.get_feed(&categories, 25).await.unwrap();
        assert!(feed.success);
        assert_eq!(feed.news.len(), 2);
        assert_eq!(feed.total, 2);
    }

    #[tokio::test]
    async fn search_posts_query_and_limit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/news/search"))
            .and(body_partial_json(json!({ "query": "fusion", "limit": 25 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "news": [sample_item("a")],
                "query": "fusion",
                "total": 1
            })))
            .mount(&server)
            .await;

        let api = NewsApi::new(server.uri()).unwrap();
        let result = api.search_news("fusion", None, None, 25).await.unwrap();
        assert_eq!(result.query, "fusion");
        assert_eq!(result.news.len(), 1);
    }

    #[tokio::test]
    async fn categories_decodes_the_fixed_set() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "categories": ["Technology", "Science", "Business"]
            })))
            .mount(&server)
            .await;

        let api = NewsApi::new(server.uri()).unwrap();
        let response = api.get_categories().await.unwrap();
        assert_eq!(response.categories.len(), 3);
        assert_eq!(response.categories[0], "Technology");
    }

    #[tokio::test]
    async fn non_2xx_with_detail_surfaces_the_detail() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news/trends/Cooking"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({ "detail": "Invalid category: Cooking" })),
            )
            .mount(&server)
            .await;

        let api = NewsApi::new(server.uri()).unwrap();
        let err = api.get_trends("Cooking", 25).await.unwrap_err();
        match &err {
            NewsflowError::Api { status, detail } => {
                assert_eq!(*status, 400);
                assert_eq!(detail.as_deref(), Some("Invalid category: Cooking"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.user_message("fallback"), "Invalid category: Cooking");
    }

    #[tokio::test]
    async fn non_2xx_without_detail_keeps_none() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/news/summarize"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let api = NewsApi::new(server.uri()).unwrap();
        let err = api.summarize("https://example.com/a").await.unwrap_err();
        match &err {
            NewsflowError::Api { status, detail } => {
                assert_eq!(*status, 500);
                assert!(detail.is_none());
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(
            err.user_message("Failed to summarize article"),
            "Failed to summarize article"
        );
    }

    #[tokio::test]
    async fn speak_returns_raw_bytes() {
        let server = MockServer::start().await;
        let audio = vec![0x49u8, 0x44, 0x33, 0x04, 0x00];
        Mock::given(method("POST"))
            .and(path("/news/speak"))
            .and(body_partial_json(json!({ "text": "hello", "language": "en" })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(audio.clone())
                    .insert_header("content-type", "audio/mpeg"),
            )
            .mount(&server)
            .await;

        let api = NewsApi::new(server.uri()).unwrap();
        let bytes = api.speak_text("hello", "en").await.unwrap();
        assert_eq!(bytes, audio);
    }

    #[tokio::test]
    async fn chat_sends_history_and_decodes_sources() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/news/chat"))
            .and(body_partial_json(json!({
                "message": "what happened today?",
                "history": [{ "role": "assistant", "content": "hi" }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "response": "Markets rallied.",
                "sources": ["https://example.com/markets"]
            })))
            .mount(&server)
            .await;

        let api = NewsApi::new(server.uri()).unwrap();
        let history = vec![ChatMessage::assistant("hi")];
        let reply = api.chat("what happened today?", &history).await.unwrap();
        assert_eq!(reply.response, "Markets rallied.");
        assert_eq!(reply.sources.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn related_query_is_percent_encoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/news/related/rust language"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "related": [],
                "query": "rust language"
            })))
            .mount(&server)
            .await;

        let api = NewsApi::new(server.uri()).unwrap();
        let related = api
            .get_related("rust language", crate::constants::DEFAULT_RELATED_LIMIT)
            .await
            .unwrap();
        assert_eq!(related.query, "rust language");
        assert!(related.related.is_empty());
    }
}
