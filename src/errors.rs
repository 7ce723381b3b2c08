use thiserror::Error;

#[derive(Error, Debug)]
pub enum NewsflowError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("backend returned HTTP {status}")]
    Api { status: u16, detail: Option<String> },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("preferences error: {0}")]
    Preferences(String),

    #[error("audio error: {0}")]
    Audio(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

pub type NewsflowResult<T> = std::result::Result<T, NewsflowError>;

impl NewsflowError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        NewsflowError::Config(msg.into())
    }

    pub fn preferences_error(msg: impl Into<String>) -> Self {
        NewsflowError::Preferences(msg.into())
    }

    pub fn audio_error(msg: impl Into<String>) -> Self {
        NewsflowError::Audio(msg.into())
    }

    /// Builds the message shown to the user for a failed call. A backend
    /// `detail` field wins over the caller's fixed fallback string.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            NewsflowError::Api {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_backend_detail() {
        let err = NewsflowError::Api {
            status: 400,
            detail: Some("Invalid category: Cooking".to_string()),
        };
        assert_eq!(
            err.user_message("Failed to fetch trending news."),
            "Invalid category: Cooking"
        );
    }

    #[test]
    fn user_message_falls_back_without_detail() {
        let err = NewsflowError::Api {
            status: 500,
            detail: None,
        };
        assert_eq!(
            err.user_message("Failed to fetch trending news."),
            "Failed to fetch trending news."
        );

        let err = NewsflowError::Api {
            status: 500,
            detail: Some(String::new()),
        };
        assert_eq!(err.user_message("fallback"), "fallback");
    }
}
