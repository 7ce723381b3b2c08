//! Per-view fetch lifecycle: `Idle -> Loading -> Ready | Failed`.
//!
//! Fetches run on spawned tasks and resolve in arbitrary order, so every
//! in-flight request carries a generation token. A completion with a stale
//! token is discarded, which keeps an older response from overwriting a newer
//! one after rapid refreshes.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    Idle,
    Loading,
    Ready(T),
    Failed(String),
}

/// Token handed to the task servicing one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

#[derive(Debug)]
pub struct Fetch<T> {
    state: FetchState<T>,
    generation: u64,
}

impl<T> Default for Fetch<T> {
    fn default() -> Self {
        Self {
            state: FetchState::Idle,
            generation: 0,
        }
    }
}

impl<T> Fetch<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request: bumps the generation and moves to `Loading`.
    /// Any still-running older request is thereby invalidated.
    pub fn begin(&mut self) -> FetchToken {
        self.generation += 1;
        self.state = FetchState::Loading;
        FetchToken(self.generation)
    }

    /// Applies a completed request. Returns false (and changes nothing) when
    /// the token is stale. A successful completion always replaces the
    /// previous value entirely.
    pub fn complete(&mut self, token: FetchToken, result: Result<T, String>) -> bool {
        if token.0 != self.generation {
            return false;
        }
        self.state = match result {
            Ok(value) => FetchState::Ready(value),
            Err(message) => FetchState::Failed(message),
        };
        true
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    pub fn value(&self) -> Option<&T> {
        match &self.state {
            FetchState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            FetchState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Dismisses an inline error banner, returning to `Idle`.
    pub fn dismiss_error(&mut self) {
        if matches!(self.state, FetchState::Failed(_)) {
            self.state = FetchState::Idle;
        }
    }
}
