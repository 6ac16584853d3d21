//! Search palette state machine.
//!
//! Keystrokes update the live query at once and (re)arm a single debounce
//! timer. When a timer survives its quiet period it dispatches one detached
//! fetch tagged with the generation that was live when the keystroke landed.
//! A fetch only commits if that generation is still live on resolution, so a
//! slow response for an older query can never overwrite newer results.
//!
//! Closing cancels the timer and detaches the keyboard listener; an in-flight
//! fetch is left alone and discarded by the same generation check.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use dialect_core::config::PaletteSettings;
use dialect_core::traits::{Navigator, RecordStore};
use dialect_core::types::{Key, ScoredResult, SearchStatus, SearchableRecord};
use dialect_text::{rank, sanitize_with_limit, tokenize};

use crate::fetch;
use crate::keyboard::{KeyboardHub, KeyboardSubscription};
use crate::view::{PaletteView, ViewMode};

/// What a key press did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Moved(usize),
    Navigated(String),
    Closed,
    /// Handled, but there was nothing to act on.
    Noop,
    /// The palette is closed or the key is not bound.
    Ignored,
}

#[derive(Debug, Default)]
pub(crate) struct PaletteState {
    pub(crate) visible: bool,
    pub(crate) query: String,
    pub(crate) sanitized: String,
    pub(crate) generation: u64,
    pub(crate) status: SearchStatus,
    pub(crate) results: Vec<ScoredResult>,
    pub(crate) trending: Vec<SearchableRecord>,
    pub(crate) trending_loaded: bool,
    pub(crate) selected: usize,
}

impl PaletteState {
    pub(crate) fn mode(&self) -> ViewMode {
        if !self.results.is_empty() {
            ViewMode::Results
        } else if !self.sanitized.is_empty()
            && matches!(self.status, SearchStatus::Resolved | SearchStatus::Errored)
        {
            ViewMode::Empty
        } else {
            ViewMode::Trending
        }
    }

    fn active_len(&self) -> usize {
        match self.mode() {
            ViewMode::Results => self.results.len(),
            ViewMode::Trending => self.trending.len(),
            ViewMode::Empty => 0,
        }
    }

    fn active_record(&self, index: usize) -> Option<&SearchableRecord> {
        match self.mode() {
            ViewMode::Results => self.results.get(index).map(|r| &r.record),
            ViewMode::Trending => self.trending.get(index),
            ViewMode::Empty => None,
        }
    }

    /// `None` exactly when the displayed list is empty.
    pub(crate) fn selection(&self) -> Option<usize> {
        match self.active_len() {
            0 => None,
            n => Some(self.selected.min(n - 1)),
        }
    }

    fn clear_search(&mut self) {
        self.query.clear();
        self.sanitized.clear();
        self.results.clear();
        self.status = SearchStatus::Idle;
        self.selected = 0;
    }
}

fn lock(state: &Mutex<PaletteState>) -> MutexGuard<'_, PaletteState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

pub struct SearchEngine<S, N> {
    store: Arc<S>,
    navigator: N,
    settings: PaletteSettings,
    state: Arc<Mutex<PaletteState>>,
    keyboard: KeyboardHub,
    listener: Option<KeyboardSubscription>,
    pending: Option<JoinHandle<()>>,
}

impl<S, N> SearchEngine<S, N>
where
    S: RecordStore + 'static,
    N: Navigator,
{
    pub fn new(store: Arc<S>, navigator: N, settings: PaletteSettings, keyboard: KeyboardHub) -> Self {
        Self {
            store,
            navigator,
            settings,
            state: Arc::new(Mutex::new(PaletteState::default())),
            keyboard,
            listener: None,
            pending: None,
        }
    }

    pub fn settings(&self) -> &PaletteSettings {
        &self.settings
    }

    /// Show or hide the palette. Showing fetches the trending list the first
    /// time in a session and reuses it afterwards.
    pub async fn open(&mut self, visible: bool) {
        if visible {
            self.show().await;
        } else {
            self.close();
        }
    }

    async fn show(&mut self) {
        if self.listener.is_none() {
            self.listener = Some(self.keyboard.subscribe());
            let mut state = lock(&self.state);
            state.visible = true;
            state.selected = 0;
            debug!("palette opened, keyboard listener attached");
        }
        self.ensure_trending().await;
    }

    async fn ensure_trending(&mut self) {
        if lock(&self.state).trending_loaded {
            debug!("reusing cached trending list");
            return;
        }
        let query = fetch::build_trending_query(self.settings.trending_limit);
        match self.store.query_records(&query).await {
            Ok(records) => {
                info!(count = records.len(), "trending list populated");
                let mut state = lock(&self.state);
                state.trending = records;
                state.trending_loaded = true;
                state.selected = 0;
            }
            Err(e) => warn!(error = %e, "trending fetch failed, will retry on next open"),
        }
    }

    fn close(&mut self) {
        self.cancel_pending();
        if self.listener.take().is_some() {
            debug!("palette closed, keyboard listener detached");
        }
        let mut state = lock(&self.state);
        state.visible = false;
        // orphan any fetch still in flight
        state.generation += 1;
        state.clear_search();
    }

    /// Close and forget the trending list; the next open fetches it again.
    pub fn reset_session(&mut self) {
        self.close();
        let mut state = lock(&self.state);
        state.trending.clear();
        state.trending_loaded = false;
    }

    /// Apply the input box's new text after a keystroke.
    pub fn set_query(&mut self, raw: &str) {
        if self.listener.is_none() {
            debug!("ignoring input while palette is closed");
            return;
        }
        let sanitized = sanitize_with_limit(raw, self.settings.max_query_chars);
        let generation = {
            let mut state = lock(&self.state);
            state.generation += 1;
            state.query = raw.to_string();
            state.sanitized = sanitized.clone();
            state.status = SearchStatus::Idle;
            state.selected = 0;
            if sanitized.is_empty() {
                state.results.clear();
            }
            state.generation
        };

        self.cancel_pending();
        if sanitized.is_empty() {
            return;
        }
        self.pending = Some(self.spawn_debounced(generation, sanitized));
    }

    fn spawn_debounced(&self, generation: u64, sanitized: String) -> JoinHandle<()> {
        let state = Arc::clone(&self.state);
        let store = Arc::clone(&self.store);
        let settings = self.settings.clone();
        tokio::spawn(async move {
            tokio::time::sleep(settings.debounce()).await;
            {
                let mut guard = lock(&state);
                if guard.generation != generation {
                    return;
                }
                guard.status = SearchStatus::Pending;
            }
            debug!(generation, query = %sanitized, "quiet period elapsed, dispatching search");
            // detached: closing the palette must not cancel a request already on the wire
            tokio::spawn(run_search(state, store, settings, generation, sanitized));
        })
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        if self.listener.is_none() {
            return KeyOutcome::Ignored;
        }
        match key {
            Key::ArrowDown | Key::ArrowUp => {
                let mut state = lock(&self.state);
                let count = state.active_len();
                if count == 0 {
                    return KeyOutcome::Noop;
                }
                let current = state.selected.min(count - 1);
                state.selected = if key == Key::ArrowDown {
                    (current + 1) % count
                } else {
                    (current + count - 1) % count
                };
                KeyOutcome::Moved(state.selected)
            }
            Key::Enter => {
                let path = {
                    let state = lock(&self.state);
                    let target = state
                        .selection()
                        .and_then(|i| state.active_record(i))
                        .map(|r| r.detail_path(&self.settings.detail_path_prefix));
                    target
                };
                match path {
                    Some(path) => {
                        info!(path = %path, "navigating to search result");
                        self.navigator.go_to(&path);
                        self.close();
                        KeyOutcome::Navigated(path)
                    }
                    None => KeyOutcome::Noop,
                }
            }
            Key::Escape => {
                self.close();
                KeyOutcome::Closed
            }
            Key::Other => KeyOutcome::Ignored,
        }
    }

    pub fn render(&self) -> PaletteView {
        PaletteView::from_state(&lock(&self.state), &self.settings.detail_path_prefix)
    }

    pub fn is_open(&self) -> bool {
        self.listener.is_some()
    }

    pub fn query(&self) -> String {
        lock(&self.state).query.clone()
    }

    pub fn status(&self) -> SearchStatus {
        lock(&self.state).status
    }

    pub fn selected(&self) -> Option<usize> {
        lock(&self.state).selection()
    }

    pub fn results(&self) -> Vec<ScoredResult> {
        lock(&self.state).results.clone()
    }

    pub fn trending(&self) -> Vec<SearchableRecord> {
        lock(&self.state).trending.clone()
    }
}

impl<S, N> Drop for SearchEngine<S, N> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

async fn run_search<S>(
    state: Arc<Mutex<PaletteState>>,
    store: Arc<S>,
    settings: PaletteSettings,
    generation: u64,
    sanitized: String,
) where
    S: RecordStore + 'static,
{
    let outcome = fetch::search(store.as_ref(), &sanitized, &settings).await;

    let mut guard = lock(&state);
    if guard.generation != generation {
        debug!(generation, live = guard.generation, query = %sanitized, "discarding stale search response");
        return;
    }
    match outcome {
        Ok(records) => {
            let tokens = tokenize(&sanitized);
            guard.results = rank(records, &tokens, settings.result_limit);
            guard.status = SearchStatus::Resolved;
            debug!(query = %sanitized, hits = guard.results.len(), "search resolved");
        }
        Err(e) => {
            warn!(error = %e, query = %sanitized, "search failed, clearing results");
            guard.results.clear();
            guard.status = SearchStatus::Errored;
        }
    }
    guard.selected = 0;
}
