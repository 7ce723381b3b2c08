use crate::api::NewsApi;
use crate::chat::ChatPanel;
use crate::constants::{ALL_CATEGORY, CATEGORIES};
use crate::enhancer::Enhancer;
use crate::fetch::Fetch;
use crate::log_view::LogView;
use crate::models::DigestResponse;
use crate::audio::SpeechPlayer;
use crate::preferences::PreferenceStore;
use crate::status_indicator::StatusIndicator;
use crate::ui::news_list::NewsList;
use std::time::{Duration, Instant};

/// Screens of the client. Overlays (chat, enhancer, quit confirm) sit on top
/// of whichever screen is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Feed,
    Search,
    Trends,
    Videos,
    Digest,
    Settings,
    QuitConfirm,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoMode {
    Latest,
    Trending,
    Category,
}

impl VideoMode {
    pub fn label(&self) -> &'static str {
        match self {
            VideoMode::Latest => "Latest",
            VideoMode::Trending => "Trending",
            VideoMode::Category => "By category",
        }
    }

    pub fn next(&mut self) {
        *self = match self {
            VideoMode::Latest => VideoMode::Trending,
            VideoMode::Trending => VideoMode::Category,
            VideoMode::Category => VideoMode::Latest,
        };
    }
}

/// State of the settings screen: cursor over the fixed category set plus the
/// current (unsaved) selection.
#[derive(Debug)]
pub struct SettingsView {
    pub cursor: usize,
    pub selected: Vec<String>,
    saved_at: Option<Instant>,
}

impl SettingsView {
    pub fn new(selected: Vec<String>) -> Self {
        Self {
            cursor: 0,
            selected,
            saved_at: None,
        }
    }

    pub fn cursor_category(&self) -> &'static str {
        CATEGORIES[self.cursor]
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < CATEGORIES.len() {
            self.cursor += 1;
        }
    }

    pub fn is_selected(&self, category: &str) -> bool {
        self.selected.iter().any(|c| c == category)
    }

    pub fn toggle_current(&mut self) {
        let category = self.cursor_category().to_string();
        if let Some(pos) = self.selected.iter().position(|c| *c == category) {
            self.selected.remove(pos);
        } else {
            self.selected.push(category);
        }
        self.saved_at = None;
    }

    pub fn mark_saved(&mut self) {
        self.saved_at = Some(Instant::now());
    }

    /// True while the transient "Saved" indicator should be shown.
    pub fn saved_recently(&self) -> bool {
        self.saved_at
            .map(|at| at.elapsed() < Duration::from_secs(2))
            .unwrap_or(false)
    }
}

pub struct App {
    pub state: AppState,
    pub return_state: AppState,
    pub api: NewsApi,
    pub prefs: PreferenceStore,

    pub feed: NewsList,

    pub search: NewsList,
    pub search_input: String,
    pub search_editing: bool,
    pub last_search_query: Option<String>,

    pub trends: NewsList,
    pub trends_category_idx: usize,

    pub videos: NewsList,
    pub video_mode: VideoMode,
    pub video_category_idx: usize,

    pub digest: Fetch<DigestResponse>,
    pub digest_scroll: u16,

    pub settings: SettingsView,

    pub chat: ChatPanel,
    pub enhancer: Enhancer,
    pub speech: SpeechPlayer,

    pub status_indicator: StatusIndicator,
    pub logs: LogView,
}

impl App {
    pub fn new(api: NewsApi, prefs: PreferenceStore) -> App {
        let selected = prefs.load();
        App {
            state: AppState::Feed,
            return_state: AppState::Feed,
            api,
            prefs,
            feed: NewsList::new(),
            search: NewsList::new(),
            search_input: String::new(),
            search_editing: false,
            last_search_query: None,
            trends: NewsList::new(),
            trends_category_idx: 0,
            videos: NewsList::new(),
            video_mode: VideoMode::Latest,
            video_category_idx: 0,
            digest: Fetch::new(),
            digest_scroll: 0,
            settings: SettingsView::new(selected),
            chat: ChatPanel::new(),
            enhancer: Enhancer::new(),
            speech: SpeechPlayer::new(),
            status_indicator: StatusIndicator::new(),
            logs: LogView::new(),
        }
    }

    /// The trends screen cycles `All` plus the fixed category set.
    pub fn trends_category(&self) -> &'static str {
        if self.trends_category_idx == 0 {
            ALL_CATEGORY
        } else {
            CATEGORIES[self.trends_category_idx - 1]
        }
    }

    pub fn cycle_trends_category(&mut self, forward: bool) {
        let count = CATEGORIES.len() + 1;
        self.trends_category_idx = if forward {
            (self.trends_category_idx + 1) % count
        } else {
            (self.trends_category_idx + count - 1) % count
        };
    }

    pub fn video_category(&self) -> &'static str {
        CATEGORIES[self.video_category_idx]
    }

    pub fn cycle_video_category(&mut self, forward: bool) {
        let count = CATEGORIES.len();
        self.video_category_idx = if forward {
            (self.video_category_idx + 1) % count
        } else {
            (self.video_category_idx + count - 1) % count
        };
    }

    /// True when any screen or overlay has a request in flight.
    pub fn is_busy(&self) -> bool {
        self.feed.fetch.is_loading()
            || self.search.fetch.is_loading()
            || self.trends.fetch.is_loading()
            || self.videos.fetch.is_loading()
            || self.digest.is_loading()
            || self.chat.waiting
            || self.enhancer.summarize_state.is_loading()
            || self.enhancer.translate_state.is_loading()
            || self.enhancer.speak_state.is_loading()
    }

    /// Periodic upkeep driven by the draw loop.
    pub fn tick(&mut self) {
        self.status_indicator.set_thinking(self.is_busy());
        self.status_indicator.update_spinner();
        if self.speech.is_playing() {
            self.status_indicator.set_status("Playing audio...");
        } else if !self.is_busy() {
            self.status_indicator.clear_status();
        }
    }

    pub fn request_quit(&mut self) {
        if self.state != AppState::QuitConfirm {
            self.return_state = self.state;
            self.state = AppState::QuitConfirm;
        }
    }

    pub fn cancel_quit(&mut self) {
        self.state = self.return_state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_toggle_flips_selection() {
        let mut view = SettingsView::new(vec![]);
        view.toggle_current();
        assert!(view.is_selected("Technology"));
        view.toggle_current();
        assert!(!view.is_selected("Technology"));
    }

    #[test]
    fn settings_cursor_stays_in_bounds() {
        let mut view = SettingsView::new(vec![]);
        view.move_up();
        assert_eq!(view.cursor, 0);
        for _ in 0..100 {
            view.move_down();
        }
        assert_eq!(view.cursor, CATEGORIES.len() - 1);
    }

    #[test]
    fn toggling_clears_saved_indicator() {
        let mut view = SettingsView::new(vec![]);
        view.mark_saved();
        assert!(view.saved_recently());
        view.toggle_current();
        assert!(!view.saved_recently());
    }

    #[test]
    fn video_mode_cycles() {
        let mut mode = VideoMode::Latest;
        mode.next();
        assert_eq!(mode, VideoMode::Trending);
        mode.next();
        assert_eq!(mode, VideoMode::Category);
        mode.next();
        assert_eq!(mode, VideoMode::Latest);
    }
}
