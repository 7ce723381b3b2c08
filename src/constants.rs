// API Constants
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api/v1";
pub const API_TIMEOUT_SECS: u64 = 60; // generous ceiling for the AI-backed endpoints

// Default request limits, mirrored from the backend
pub const DEFAULT_NEWS_LIMIT: u32 = 25;
pub const DEFAULT_VIDEO_LIMIT: u32 = 15;
pub const DEFAULT_RELATED_LIMIT: u32 = 5;
pub const DEFAULT_VIDEO_QUERY: &str = "latest news";

/// Category set accepted by the backend.
pub const CATEGORIES: [&str; 15] = [
    "Technology",
    "Business",
    "Science",
    "Health",
    "Entertainment",
    "Sports",
    "Politics",
    "World",
    "Environment",
    "Finance",
    "Education",
    "Travel",
    "Food",
    "Fashion",
    "Art",
];

/// Pseudo-category the trends endpoint accepts in addition to the fixed set.
pub const ALL_CATEGORY: &str = "All";

// Chat widget fixed strings
pub const CHAT_GREETING: &str =
    "Hi! I'm your AI news assistant. Ask me anything about current events!";
pub const CHAT_ERROR_FALLBACK: &str = "Sorry, I encountered an error. Please try again.";

// Per-view fallback error messages, used when the backend supplies no detail
pub const FEED_ERROR: &str = "Failed to fetch news. Make sure the backend is running.";
pub const SEARCH_ERROR: &str = "Failed to search. Please try again.";
pub const TRENDS_ERROR: &str = "Failed to fetch trending news.";
pub const VIDEOS_ERROR: &str = "Failed to fetch video news.";
pub const DIGEST_ERROR: &str = "Failed to generate the daily digest.";
pub const SUMMARIZE_ERROR: &str = "Failed to summarize article";
pub const SUMMARIZE_VIDEO_ERROR: &str = "Failed to summarize video. Captions might be disabled.";
pub const TRANSLATE_ERROR: &str = "Failed to translate text";
pub const SPEAK_ERROR: &str = "Failed to generate speech";
