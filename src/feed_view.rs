use crate::config::get_config;
use crate::constants::FEED_ERROR;
use crate::ui::news_list::draw_news_list;
use crate::App;
use ratatui::{layout::Rect, Frame};
use std::sync::Arc;
use tokio::sync::Mutex;

pub fn draw_feed(f: &mut Frame, app: &mut App, area: Rect) {
    draw_news_list(f, area, &mut app.feed, "Your Feed");
}

/// Fetches the preference-filtered feed. Preferences are re-read from disk on
/// every refresh, so a save on the settings screen takes effect immediately.
pub async fn load_feed(app: Arc<Mutex<App>>) {
    let (api, categories, limit, token) = {
        let mut guard = app.lock().await;
        let token = guard.feed.begin();
        guard.logs.add("Loading feed...".to_string());
        (
            guard.api.clone(),
            guard.prefs.load(),
            get_config().news_limit,
            token,
        )
    };

    let result = api.get_feed(&categories, limit).await;

    let mut guard = app.lock().await;
    match result {
        Ok(response) => {
            guard
                .logs
                .add(format!("Feed loaded: {} items", response.news.len()));
            guard.feed.complete(token, Ok(response.news));
        }
        Err(e) => {
            log::warn!("feed request failed: {}", e);
            guard.logs.add(format!("Feed error: {}", e));
            guard.feed.complete(token, Err(e.user_message(FEED_ERROR)));
        }
    }
}
