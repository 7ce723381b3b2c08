use crate::app::VideoMode;
use crate::config::get_config;
use crate::constants::{DEFAULT_VIDEO_QUERY, VIDEOS_ERROR};
use crate::ui::news_list::draw_news_list;
use crate::App;
use ratatui::{layout::Rect, Frame};
use std::sync::Arc;
use tokio::sync::Mutex;

pub fn draw_videos(f: &mut Frame, app: &mut App, area: Rect) {
    let title = match app.video_mode {
        VideoMode::Category => {
            format!(
                "Videos — {} ◂ {} ▸",
                app.video_mode.label(),
                app.video_category()
            )
        }
        _ => format!("Videos — {}", app.video_mode.label()),
    };
    draw_news_list(f, area, &mut app.videos, &title);
}

pub async fn load_videos(app: Arc<Mutex<App>>) {
    let (api, mode, category, limit, token) = {
        let mut guard = app.lock().await;
        let token = guard.videos.begin();
        let mode = guard.video_mode;
        let category = guard.video_category().to_string();
        guard.logs.add(format!("Loading videos ({})", mode.label()));
        (
            guard.api.clone(),
            mode,
            category,
            get_config().video_limit,
            token,
        )
    };

    let result = match mode {
        VideoMode::Latest => api.get_video_news(DEFAULT_VIDEO_QUERY, limit).await,
        VideoMode::Trending => api.get_trending_videos(limit).await,
        VideoMode::Category => api.get_videos_by_category(&category, limit).await,
    };

    let mut guard = app.lock().await;
    match result {
        Ok(response) => {
            guard
                .logs
                .add(format!("Videos loaded: {} items", response.videos.len()));
            guard.videos.complete(token, Ok(response.videos));
        }
        Err(e) => {
            log::warn!("video request failed: {}", e);
            guard.logs.add(format!("Videos error: {}", e));
            guard
                .videos
                .complete(token, Err(e.user_message(VIDEOS_ERROR)));
        }
    }
}
