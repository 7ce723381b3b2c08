use crate::config::get_config;
use crate::constants::SEARCH_ERROR;
use crate::ui::news_list::draw_news_list;
use crate::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use unicode_width::UnicodeWidthStr;

pub fn draw_search(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)].as_ref())
        .split(area);

    let prompt_style = if app.search_editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let input = Paragraph::new(Line::from(vec![
        Span::styled("🔎 ", prompt_style),
        Span::styled(app.search_input.as_str(), Style::default().fg(Color::White)),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Search"));
    f.render_widget(input, chunks[0]);

    if app.search_editing {
        let cursor_x = chunks[0].x + 3 + app.search_input.width() as u16;
        f.set_cursor_position((cursor_x, chunks[0].y + 1));
    }

    let title = match &app.last_search_query {
        Some(query) => format!("Results for \"{}\"", query),
        None => "Results".to_string(),
    };
    draw_news_list(f, chunks[1], &mut app.search, &title);
}

pub async fn run_search(app: Arc<Mutex<App>>, query: String) {
    let (api, limit, token) = {
        let mut guard = app.lock().await;
        let token = guard.search.begin();
        guard.last_search_query = Some(query.clone());
        guard.logs.add(format!("Searching \"{}\"...", query));
        (guard.api.clone(), get_config().news_limit, token)
    };

    let result = api.search_news(&query, None, None, limit).await;

    let mut guard = app.lock().await;
    match result {
        Ok(response) => {
            guard
                .logs
                .add(format!("Search returned {} items", response.news.len()));
            guard.search.complete(token, Ok(response.news));
        }
        Err(e) => {
            log::warn!("search request failed: {}", e);
            guard.logs.add(format!("Search error: {}", e));
            guard
                .search
                .complete(token, Err(e.user_message(SEARCH_ERROR)));
        }
    }
}
