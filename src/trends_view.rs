use crate::config::get_config;
use crate::constants::TRENDS_ERROR;
use crate::ui::news_list::draw_news_list;
use crate::App;
use ratatui::{layout::Rect, Frame};
use std::sync::Arc;
use tokio::sync::Mutex;

pub fn draw_trends(f: &mut Frame, app: &mut App, area: Rect) {
    let title = format!("Trending ◂ {} ▸", app.trends_category());
    draw_news_list(f, area, &mut app.trends, &title);
}

pub async fn load_trends(app: Arc<Mutex<App>>) {
    let (api, category, limit, token) = {
        let mut guard = app.lock().await;
        let token = guard.trends.begin();
        let category = guard.trends_category().to_string();
        guard.logs.add(format!("Loading trends: {}", category));
        (guard.api.clone(), category, get_config().news_limit, token)
    };

    let result = api.get_trends(&category, limit).await;

    let mut guard = app.lock().await;
    match result {
        Ok(response) => {
            guard
                .logs
                .add(format!("Trends loaded: {} items", response.news.len()));
            guard.trends.complete(token, Ok(response.news));
        }
        Err(e) => {
            log::warn!("trends request failed: {}", e);
            guard.logs.add(format!("Trends error: {}", e));
            guard
                .trends
                .complete(token, Err(e.user_message(TRENDS_ERROR)));
        }
    }
}
