pub mod api;
pub mod app;
pub mod audio;
pub mod chat;
pub mod chat_view;
pub mod config;
pub mod constants;
pub mod digest_view;
pub mod enhancer;
pub mod enhancer_view;
pub mod errors;
pub mod feed_view;
pub mod fetch;
pub mod key_handlers;
pub mod log_view;
pub mod logging;
pub mod models;
pub mod preferences;
pub mod search_view;
pub mod settings_view;
pub mod status_indicator;
pub mod trends_view;
pub mod ui;
pub mod videos_view;

pub use app::{App, AppState};
