//! State for the article/video enhancer: a modal over one item offering
//! summarize, translate and speak tabs. Tab state is independent; switching
//! tabs never clears another tab's result, so a generated summary seeds the
//! translate and speak tabs as default input.

use crate::constants::{SUMMARIZE_ERROR, SUMMARIZE_VIDEO_ERROR};

pub const TRANSLATE_EMPTY_INPUT: &str =
    "Please summarize the article first or enter text to translate";
pub const SPEAK_EMPTY_INPUT: &str =
    "No text available to speak. Please summarize or translate first.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhancerTab {
    Summarize,
    Translate,
    Speak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnhancerKind {
    Article,
    Video,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Idle,
    Loading,
    Done,
    Failed(String),
}

impl TaskState {
    pub fn is_loading(&self) -> bool {
        matches!(self, TaskState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            TaskState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Hindi,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
        }
    }

    pub fn toggle(&mut self) {
        *self = match self {
            Language::English => Language::Hindi,
            Language::Hindi => Language::English,
        };
    }
}

#[derive(Debug)]
pub struct Enhancer {
    pub open: bool,
    pub kind: EnhancerKind,
    pub title: String,
    pub url: String,
    pub tab: EnhancerTab,

    pub summary: Option<String>,
    pub summarize_state: TaskState,

    pub translated: Option<String>,
    pub translate_state: TaskState,
    pub target_language: Language,

    pub speak_input: String,
    pub speak_editing: bool,
    pub speak_state: TaskState,
    pub speak_language: Language,
}

impl Enhancer {
    pub fn new() -> Self {
        Self {
            open: false,
            kind: EnhancerKind::Article,
            title: String::new(),
            url: String::new(),
            tab: EnhancerTab::Summarize,
            summary: None,
            summarize_state: TaskState::Idle,
            translated: None,
            translate_state: TaskState::Idle,
            target_language: Language::Hindi,
            speak_input: String::new(),
            speak_editing: false,
            speak_state: TaskState::Idle,
            speak_language: Language::English,
        }
    }

    /// Opens the modal for an item. Reopening the same URL keeps prior
    /// results; a different item resets every tab.
    pub fn open_for(&mut self, kind: EnhancerKind, title: &str, url: &str) {
        if self.url != url {
            *self = Self::new();
            self.title = title.to_string();
            self.url = url.to_string();
        }
        self.kind = kind;
        self.open = true;
    }

    pub fn select_tab(&mut self, tab: EnhancerTab) {
        self.tab = tab;
    }

    pub fn next_tab(&mut self) {
        self.tab = match self.tab {
            EnhancerTab::Summarize => EnhancerTab::Translate,
            EnhancerTab::Translate => EnhancerTab::Speak,
            EnhancerTab::Speak => EnhancerTab::Summarize,
        };
    }

    /// Closes the modal. The caller stops speech playback; results stay so
    /// reopening the same item resumes where it left off.
    pub fn close(&mut self) {
        self.open = false;
        self.speak_editing = false;
    }

    pub fn summarize_fallback(&self) -> &'static str {
        match self.kind {
            EnhancerKind::Article => SUMMARIZE_ERROR,
            EnhancerKind::Video => SUMMARIZE_VIDEO_ERROR,
        }
    }

    /// Default input for the translate tab: the summary if present, else the
    /// previously translated text.
    pub fn translate_input(&self) -> Option<String> {
        self.summary
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| self.translated.clone().filter(|s| !s.is_empty()))
    }

    /// Text for the speak tab: explicit input first, then translated text,
    /// then the summary.
    pub fn speak_text(&self) -> Option<String> {
        let explicit = self.speak_input.trim();
        if !explicit.is_empty() {
            return Some(explicit.to_string());
        }
        self.translated
            .clone()
            .filter(|s| !s.is_empty())
            .or_else(|| self.summary.clone().filter(|s| !s.is_empty()))
    }

    pub fn begin_summarize(&mut self) {
        self.summarize_state = TaskState::Loading;
    }

    pub fn complete_summarize(&mut self, result: Result<String, String>) {
        match result {
            Ok(summary) => {
                self.summary = Some(summary);
                self.summarize_state = TaskState::Done;
            }
            Err(message) => self.summarize_state = TaskState::Failed(message),
        }
    }

    /// Starts a translate request, returning the text to send, or records a
    /// local validation error when there is nothing to translate.
    pub fn begin_translate(&mut self) -> Option<String> {
        match self.translate_input() {
            Some(text) => {
                self.translate_state = TaskState::Loading;
                Some(text)
            }
            None => {
                self.translate_state = TaskState::Failed(TRANSLATE_EMPTY_INPUT.to_string());
                None
            }
        }
    }

    pub fn complete_translate(&mut self, result: Result<String, String>) {
        match result {
            Ok(translated) => {
                self.translated = Some(translated);
                self.translate_state = TaskState::Done;
            }
            Err(message) => self.translate_state = TaskState::Failed(message),
        }
    }

    /// Starts a speak request, returning the text to synthesize, or records a
    /// local validation error when no text is available.
    pub fn begin_speak(&mut self) -> Option<String> {
        match self.speak_text() {
            Some(text) => {
                self.speak_state = TaskState::Loading;
                Some(text)
            }
            None => {
                self.speak_state = TaskState::Failed(SPEAK_EMPTY_INPUT.to_string());
                None
            }
        }
    }

    pub fn complete_speak(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => self.speak_state = TaskState::Done,
            Err(message) => self.speak_state = TaskState::Failed(message),
        }
    }

    /// The active tab's result, for copy-to-clipboard.
    pub fn active_result(&self) -> Option<&str> {
        match self.tab {
            EnhancerTab::Summarize => self.summary.as_deref(),
            EnhancerTab::Translate => self.translated.as_deref(),
            EnhancerTab::Speak => None,
        }
    }

    pub fn active_state(&self) -> &TaskState {
        match self.tab {
            EnhancerTab::Summarize => &self.summarize_state,
            EnhancerTab::Translate => &self.translate_state,
            EnhancerTab::Speak => &self.speak_state,
        }
    }
}

impl Default for Enhancer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_article() -> Enhancer {
        let mut enhancer = Enhancer::new();
        enhancer.open_for(
            EnhancerKind::Article,
            "Quantum chip breaks record",
            "https://example.com/quantum",
        );
        enhancer
    }

    #[test]
    fn switching_tabs_preserves_other_tab_state() {
        let mut enhancer = open_article();
        enhancer.begin_summarize();
        enhancer.complete_summarize(Ok("A short summary.".to_string()));

        enhancer.select_tab(EnhancerTab::Translate);
        enhancer.select_tab(EnhancerTab::Speak);
        enhancer.select_tab(EnhancerTab::Summarize);

        assert_eq!(enhancer.summary.as_deref(), Some("A short summary."));
        assert_eq!(enhancer.summarize_state, TaskState::Done);
    }

    #[test]
    fn summary_seeds_translate_and_speak() {
        let mut enhancer = open_article();
        enhancer.complete_summarize(Ok("A short summary.".to_string()));
        assert_eq!(enhancer.translate_input().as_deref(), Some("A short summary."));
        assert_eq!(enhancer.speak_text().as_deref(), Some("A short summary."));
    }

    #[test]
    fn translated_text_wins_over_summary_for_speak() {
        let mut enhancer = open_article();
        enhancer.complete_summarize(Ok("Summary.".to_string()));
        enhancer.complete_translate(Ok("Anuvad.".to_string()));
        assert_eq!(enhancer.speak_text().as_deref(), Some("Anuvad."));

        enhancer.speak_input = "Custom text".to_string();
        assert_eq!(enhancer.speak_text().as_deref(), Some("Custom text"));
    }

    #[test]
    fn translate_without_input_is_a_local_error() {
        let mut enhancer = open_article();
        assert!(enhancer.begin_translate().is_none());
        assert_eq!(
            enhancer.translate_state.error(),
            Some(TRANSLATE_EMPTY_INPUT)
        );
        // Other tabs are untouched.
        assert_eq!(enhancer.summarize_state, TaskState::Idle);
    }

    #[test]
    fn speak_without_text_is_a_local_error() {
        let mut enhancer = open_article();
        assert!(enhancer.begin_speak().is_none());
        assert_eq!(enhancer.speak_state.error(), Some(SPEAK_EMPTY_INPUT));
    }

    #[test]
    fn reopening_same_item_keeps_results() {
        let mut enhancer = open_article();
        enhancer.complete_summarize(Ok("Kept.".to_string()));
        enhancer.close();
        enhancer.open_for(
            EnhancerKind::Article,
            "Quantum chip breaks record",
            "https://example.com/quantum",
        );
        assert_eq!(enhancer.summary.as_deref(), Some("Kept."));
    }

    #[test]
    fn opening_a_different_item_resets_all_tabs() {
        let mut enhancer = open_article();
        enhancer.complete_summarize(Ok("Old.".to_string()));
        enhancer.open_for(EnhancerKind::Video, "Other", "https://example.com/other");
        assert!(enhancer.summary.is_none());
        assert_eq!(enhancer.summarize_state, TaskState::Idle);
        assert_eq!(enhancer.kind, EnhancerKind::Video);
    }

    #[test]
    fn active_state_follows_the_selected_tab() {
        let mut enhancer = open_article();
        enhancer.begin_summarize();
        assert!(enhancer.active_state().is_loading());

        enhancer.select_tab(EnhancerTab::Translate);
        assert_eq!(*enhancer.active_state(), TaskState::Idle);

        enhancer.select_tab(EnhancerTab::Speak);
        enhancer.speak_state = TaskState::Failed("no audio device".to_string());
        assert_eq!(enhancer.active_state().error(), Some("no audio device"));
    }

    #[test]
    fn video_kind_uses_video_fallback() {
        let mut enhancer = Enhancer::new();
        enhancer.open_for(EnhancerKind::Video, "Clip", "https://example.com/v");
        assert_eq!(enhancer.summarize_fallback(), SUMMARIZE_VIDEO_ERROR);
    }
}
