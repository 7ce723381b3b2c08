//! Terminal setup, the draw/event loop, and layout helpers. Screen bodies
//! live in the `*_view` modules; shared widgets under `ui/`.

pub mod footer;
pub mod header;
pub mod news_list;
pub mod quit_confirm;

use crate::key_handlers::handle_key;
use crate::{
    chat_view, digest_view, enhancer_view, feed_view, search_view, settings_view, trends_view,
    videos_view, App, AppState,
};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Runs the terminal UI until the user quits.
pub async fn run_ui(app: Arc<Mutex<App>>) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: Arc<Mutex<App>>,
) -> io::Result<()> {
    loop {
        {
            let mut guard = app.lock().await;
            guard.tick();
            if guard.state == AppState::Quit {
                break;
            }
            terminal.draw(|f| draw(f, &mut guard))?;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let mut guard = app.lock().await;
                    handle_key(key, &mut guard, app.clone());
                }
            }
        }
    }
    Ok(())
}

pub fn draw(f: &mut Frame, app: &mut App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(f.area());

    header::draw_header(f, outer[0], app);

    let body = if app.logs.visible {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(34)].as_ref())
            .split(outer[1]);
        app.logs.render(f, split[1]);
        split[0]
    } else {
        outer[1]
    };

    match app.state {
        AppState::Feed => feed_view::draw_feed(f, app, body),
        AppState::Search => search_view::draw_search(f, app, body),
        AppState::Trends => trends_view::draw_trends(f, app, body),
        AppState::Videos => videos_view::draw_videos(f, app, body),
        AppState::Digest => digest_view::draw_digest(f, app, body),
        AppState::Settings => settings_view::draw_settings(f, app, body),
        AppState::QuitConfirm | AppState::Quit => {}
    }

    app.status_indicator.render(f, outer[2]);
    footer::draw_footer(f, outer[3], app);

    if app.chat.open {
        chat_view::draw_chat(f, app);
    }
    if app.enhancer.open {
        enhancer_view::draw_enhancer(f, app);
    }
    if app.state == AppState::QuitConfirm {
        quit_confirm::draw_quit_confirm(f, overlay_rect(40, 20, f.area()));
    }
}

/// A centered rectangle covering the given percentages of `r`.
pub fn overlay_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage((100 - percent_y) / 2),
                Constraint::Percentage(percent_y),
                Constraint::Percentage((100 - percent_y) / 2),
            ]
            .as_ref(),
        )
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage((100 - percent_x) / 2),
                Constraint::Percentage(percent_x),
                Constraint::Percentage((100 - percent_x) / 2),
            ]
            .as_ref(),
        )
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_rect_is_centered_and_sized() {
        let outer = Rect::new(0, 0, 100, 100);
        let rect = overlay_rect(60, 70, outer);
        assert_eq!(rect.width, 60);
        assert_eq!(rect.height, 70);
        assert_eq!(rect.x, 20);
        assert_eq!(rect.y, 15);
    }

    #[test]
    fn overlay_rect_fits_inside_small_areas() {
        let outer = Rect::new(0, 0, 10, 4);
        let rect = overlay_rect(70, 80, outer);
        assert!(rect.width <= outer.width);
        assert!(rect.height <= outer.height);
    }
}
