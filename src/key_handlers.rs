use crate::app::VideoMode;
use crate::enhancer::{EnhancerKind, EnhancerTab};
use crate::fetch::FetchState;
use crate::{
    chat_view, digest_view, enhancer_view, feed_view, search_view, trends_view, videos_view, App,
    AppState,
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Routes one key press. Overlays take precedence over the active screen.
pub fn handle_key(key: KeyEvent, app: &mut App, app_arc: Arc<Mutex<App>>) {
    if app.state == AppState::QuitConfirm {
        handle_quit_confirm(key, app);
        return;
    }
    if app.enhancer.open {
        handle_enhancer_input(key, app, app_arc);
        return;
    }
    if app.chat.open {
        handle_chat_input(key, app, app_arc);
        return;
    }

    // Global bindings, unless a screen is in text-entry mode.
    let editing = app.state == AppState::Search && app.search_editing;
    if !editing {
        match key.code {
            KeyCode::Char('q') => {
                app.request_quit();
                return;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.request_quit();
                return;
            }
            KeyCode::Char('c') => {
                app.chat.open = true;
                return;
            }
            KeyCode::Char('L') => {
                app.logs.toggle();
                return;
            }
            KeyCode::Char(c @ '1'..='6') => {
                let state = match c {
                    '1' => AppState::Feed,
                    '2' => AppState::Search,
                    '3' => AppState::Trends,
                    '4' => AppState::Videos,
                    '5' => AppState::Digest,
                    _ => AppState::Settings,
                };
                switch_screen(app, app_arc, state);
                return;
            }
            _ => {}
        }
    }

    match app.state {
        AppState::Feed => handle_feed_input(key, app, app_arc),
        AppState::Search => handle_search_input(key, app, app_arc),
        AppState::Trends => handle_trends_input(key, app, app_arc),
        AppState::Videos => handle_videos_input(key, app, app_arc),
        AppState::Digest => handle_digest_input(key, app, app_arc),
        AppState::Settings => handle_settings_input(key, app),
        AppState::QuitConfirm | AppState::Quit => {}
    }
}

/// Moves to a screen, kicking off its first fetch when nothing was loaded
/// yet.
pub fn switch_screen(app: &mut App, app_arc: Arc<Mutex<App>>, state: AppState) {
    app.state = state;
    match state {
        AppState::Feed => {
            if matches!(app.feed.fetch.state(), FetchState::Idle) {
                tokio::spawn(feed_view::load_feed(app_arc));
            }
        }
        AppState::Search => {
            app.search_editing = true;
        }
        AppState::Trends => {
            if matches!(app.trends.fetch.state(), FetchState::Idle) {
                tokio::spawn(trends_view::load_trends(app_arc));
            }
        }
        AppState::Videos => {
            if matches!(app.videos.fetch.state(), FetchState::Idle) {
                tokio::spawn(videos_view::load_videos(app_arc));
            }
        }
        AppState::Digest => {
            if matches!(app.digest.state(), FetchState::Idle) {
                tokio::spawn(digest_view::load_digest(app_arc));
            }
        }
        _ => {}
    }
}

fn open_selected_enhancer(app: &mut App, kind: EnhancerKind) {
    let item = match app.state {
        AppState::Feed => app.feed.selected_item(),
        AppState::Search => app.search.selected_item(),
        AppState::Trends => app.trends.selected_item(),
        AppState::Videos => app.videos.selected_item(),
        _ => None,
    };
    if let Some(item) = item {
        let title = item.title.clone();
        let url = item.url.clone();
        app.enhancer.open_for(kind, &title, &url);
    }
}

fn open_selected_in_browser(app: &mut App) {
    let url = match app.state {
        AppState::Feed => app.feed.selected_item().map(|i| i.url.clone()),
        AppState::Search => app.search.selected_item().map(|i| i.url.clone()),
        AppState::Trends => app.trends.selected_item().map(|i| i.url.clone()),
        AppState::Videos => app.videos.selected_item().map(|i| i.url.clone()),
        _ => None,
    };
    if let Some(url) = url {
        if let Err(e) = open::that(&url) {
            log::warn!("failed to open {}: {}", url, e);
            app.logs.add("Could not open browser".to_string());
        } else {
            app.logs.add(format!("Opened {}", url));
        }
    }
}

fn handle_feed_input(key: KeyEvent, app: &mut App, app_arc: Arc<Mutex<App>>) {
    match key.code {
        KeyCode::Up => app.feed.select_prev(),
        KeyCode::Down => app.feed.select_next(),
        KeyCode::Enter => open_selected_enhancer(app, EnhancerKind::Article),
        KeyCode::Char('o') => open_selected_in_browser(app),
        KeyCode::Char('r') => {
            tokio::spawn(feed_view::load_feed(app_arc));
        }
        KeyCode::Char('x') => app.feed.fetch.dismiss_error(),
        KeyCode::Char('/') => switch_screen(app, app_arc, AppState::Search),
        _ => {}
    }
}

fn handle_search_input(key: KeyEvent, app: &mut App, app_arc: Arc<Mutex<App>>) {
    if app.search_editing {
        match key.code {
            KeyCode::Enter => {
                let query = app.search_input.trim().to_string();
                if !query.is_empty() {
                    app.search_editing = false;
                    tokio::spawn(search_view::run_search(app_arc, query));
                }
            }
            KeyCode::Esc => app.search_editing = false,
            KeyCode::Backspace => {
                app.search_input.pop();
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.request_quit();
            }
            KeyCode::Char(c) => app.search_input.push(c),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('/') | KeyCode::Char('i') => app.search_editing = true,
        KeyCode::Up => app.search.select_prev(),
        KeyCode::Down => app.search.select_next(),
        KeyCode::Enter => open_selected_enhancer(app, EnhancerKind::Article),
        KeyCode::Char('o') => open_selected_in_browser(app),
        KeyCode::Char('r') => {
            if let Some(query) = app.last_search_query.clone() {
                tokio::spawn(search_view::run_search(app_arc, query));
            }
        }
        KeyCode::Char('x') => app.search.fetch.dismiss_error(),
        KeyCode::Esc => switch_screen(app, app_arc, AppState::Feed),
        _ => {}
    }
}

fn handle_trends_input(key: KeyEvent, app: &mut App, app_arc: Arc<Mutex<App>>) {
    match key.code {
        KeyCode::Left => {
            app.cycle_trends_category(false);
            tokio::spawn(trends_view::load_trends(app_arc));
        }
        KeyCode::Right => {
            app.cycle_trends_category(true);
            tokio::spawn(trends_view::load_trends(app_arc));
        }
        KeyCode::Up => app.trends.select_prev(),
        KeyCode::Down => app.trends.select_next(),
        KeyCode::Enter => open_selected_enhancer(app, EnhancerKind::Article),
        KeyCode::Char('o') => open_selected_in_browser(app),
        KeyCode::Char('r') => {
            tokio::spawn(trends_view::load_trends(app_arc));
        }
        KeyCode::Char('x') => app.trends.fetch.dismiss_error(),
        _ => {}
    }
}

fn handle_videos_input(key: KeyEvent, app: &mut App, app_arc: Arc<Mutex<App>>) {
    match key.code {
        KeyCode::Char('m') => {
            app.video_mode.next();
            tokio::spawn(videos_view::load_videos(app_arc));
        }
        KeyCode::Left if app.video_mode == VideoMode::Category => {
            app.cycle_video_category(false);
            tokio::spawn(videos_view::load_videos(app_arc));
        }
        KeyCode::Right if app.video_mode == VideoMode::Category => {
            app.cycle_video_category(true);
            tokio::spawn(videos_view::load_videos(app_arc));
        }
        KeyCode::Up => app.videos.select_prev(),
        KeyCode::Down => app.videos.select_next(),
        KeyCode::Enter => open_selected_enhancer(app, EnhancerKind::Video),
        KeyCode::Char('o') => open_selected_in_browser(app),
        KeyCode::Char('r') => {
            tokio::spawn(videos_view::load_videos(app_arc));
        }
        KeyCode::Char('x') => app.videos.fetch.dismiss_error(),
        _ => {}
    }
}

fn handle_digest_input(key: KeyEvent, app: &mut App, app_arc: Arc<Mutex<App>>) {
    match key.code {
        KeyCode::Char('r') => {
            tokio::spawn(digest_view::load_digest(app_arc));
        }
        KeyCode::Char('x') => app.digest.dismiss_error(),
        KeyCode::Up => app.digest_scroll = app.digest_scroll.saturating_sub(1),
        KeyCode::Down => app.digest_scroll = app.digest_scroll.saturating_add(1),
        _ => {}
    }
}

fn handle_settings_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Up => app.settings.move_up(),
        KeyCode::Down => app.settings.move_down(),
        KeyCode::Char(' ') => app.settings.toggle_current(),
        KeyCode::Char('s') => {
            let selected = app.settings.selected.clone();
            match app.prefs.save(&selected) {
                Ok(()) => {
                    app.settings.mark_saved();
                    app.logs.add("Preferences saved".to_string());
                }
                Err(e) => {
                    log::warn!("failed to save preferences: {}", e);
                    app.logs.add(format!("Save failed: {}", e));
                }
            }
        }
        _ => {}
    }
}

fn handle_chat_input(key: KeyEvent, app: &mut App, app_arc: Arc<Mutex<App>>) {
    match key.code {
        KeyCode::Esc => {
            // Closing does not cancel an in-flight request; the reply still
            // lands in the log.
            app.chat.open = false;
        }
        KeyCode::Enter => {
            let message = app.chat.input.trim().to_string();
            if !message.is_empty() && !app.chat.waiting {
                let history = app.chat.begin_send(&message);
                tokio::spawn(chat_view::send_chat(app_arc, message, history));
            }
        }
        KeyCode::Backspace => {
            app.chat.input.pop();
        }
        KeyCode::Up => app.chat.scroll_up(),
        KeyCode::Down => app.chat.scroll_down(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.request_quit();
        }
        KeyCode::Char(c) => app.chat.input.push(c),
        _ => {}
    }
}

fn handle_enhancer_input(key: KeyEvent, app: &mut App, app_arc: Arc<Mutex<App>>) {
    if app.enhancer.speak_editing {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => app.enhancer.speak_editing = false,
            KeyCode::Backspace => {
                app.enhancer.speak_input.pop();
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.request_quit();
            }
            KeyCode::Char(c) => app.enhancer.speak_input.push(c),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => {
            // Release-on-close: stop any speech playback with the dialog.
            app.enhancer.close();
            app.speech.stop();
        }
        KeyCode::Tab => app.enhancer.next_tab(),
        KeyCode::Char('l') => match app.enhancer.tab {
            EnhancerTab::Translate => app.enhancer.target_language.toggle(),
            EnhancerTab::Speak => app.enhancer.speak_language.toggle(),
            EnhancerTab::Summarize => {}
        },
        KeyCode::Char('i') if app.enhancer.tab == EnhancerTab::Speak => {
            app.enhancer.speak_editing = true;
        }
        KeyCode::Char('y') => enhancer_view::copy_active_result(app),
        KeyCode::Enter => match app.enhancer.tab {
            EnhancerTab::Summarize => {
                tokio::spawn(enhancer_view::run_summarize(app_arc));
            }
            EnhancerTab::Translate => {
                tokio::spawn(enhancer_view::run_translate(app_arc));
            }
            EnhancerTab::Speak => {
                tokio::spawn(enhancer_view::run_speak(app_arc));
            }
        },
        _ => {}
    }
}

fn handle_quit_confirm(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => app.cancel_quit(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NewsApi;
    use crate::preferences::PreferenceStore;
    use tempfile::tempdir;

    fn test_app() -> App {
        let api = NewsApi::new("http://localhost:8000/api/v1").unwrap();
        let dir = tempdir().unwrap();
        let prefs = PreferenceStore::new(dir.path().join("preferences.json"));
        App::new(api, prefs)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn closing_the_enhancer_stops_audio_playback() {
        let app = Arc::new(Mutex::new(test_app()));
        let mut guard = app.lock().await;
        guard
            .enhancer
            .open_for(EnhancerKind::Article, "Item", "https://example.com/a");
        guard.speech.play(vec![0u8; 16]).unwrap();

        handle_key(press(KeyCode::Esc), &mut guard, app.clone());

        assert!(!guard.enhancer.open);
        assert!(!guard.speech.is_playing());
    }

    #[tokio::test]
    async fn ctrl_c_in_chat_input_requests_quit() {
        let app = Arc::new(Mutex::new(test_app()));
        let mut guard = app.lock().await;
        guard.chat.open = true;

        handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut guard,
            app.clone(),
        );

        assert_eq!(guard.state, AppState::QuitConfirm);
        assert!(guard.chat.input.is_empty());
    }

    #[tokio::test]
    async fn ctrl_c_while_editing_speak_text_requests_quit() {
        let app = Arc::new(Mutex::new(test_app()));
        let mut guard = app.lock().await;
        guard
            .enhancer
            .open_for(EnhancerKind::Article, "Item", "https://example.com/a");
        guard.enhancer.tab = EnhancerTab::Speak;
        guard.enhancer.speak_editing = true;

        handle_key(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut guard,
            app.clone(),
        );

        assert_eq!(guard.state, AppState::QuitConfirm);
        assert!(guard.enhancer.speak_input.is_empty());
    }

    #[tokio::test]
    async fn plain_keys_still_reach_the_chat_input() {
        let app = Arc::new(Mutex::new(test_app()));
        let mut guard = app.lock().await;
        guard.chat.open = true;

        handle_key(press(KeyCode::Char('c')), &mut guard, app.clone());

        assert_eq!(guard.chat.input, "c");
        assert_eq!(guard.state, AppState::Feed);
    }
}
