use serde::{Deserialize, Serialize};

use dialect_text::{highlight_sanitized, Segment};

use crate::engine::PaletteState;

/// Which list the palette is showing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ViewMode {
    /// No settled query yet: the recent-posts fallback.
    Trending,
    Results,
    /// A non-empty query settled with nothing to show. Fetch failures land here too.
    Empty,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ViewItem {
    pub title: Vec<Segment>,
    pub slug: String,
    pub path: String,
    pub score: Option<u32>,
    pub selected: bool,
}

/// Everything the UI needs to draw the palette for the current state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaletteView {
    pub visible: bool,
    /// Live input text, exactly as typed.
    pub query: String,
    pub loading: bool,
    pub mode: ViewMode,
    pub items: Vec<ViewItem>,
    pub selected: Option<usize>,
    /// Row to scroll into view inside the result container. Focus stays on the input.
    pub scroll_to: Option<usize>,
    pub empty_message: Option<String>,
}

impl PaletteView {
    pub(crate) fn from_state(state: &PaletteState, detail_prefix: &str) -> Self {
        let mode = state.mode();
        let selected = if state.visible { state.selection() } else { None };

        let items = if !state.visible {
            Vec::new()
        } else {
            match mode {
                ViewMode::Results => state
                    .results
                    .iter()
                    .enumerate()
                    .map(|(i, r)| ViewItem {
                        title: highlight_sanitized(&r.record.title, &state.sanitized),
                        slug: r.record.slug.clone(),
                        path: r.record.detail_path(detail_prefix),
                        score: Some(r.score),
                        selected: selected == Some(i),
                    })
                    .collect(),
                ViewMode::Trending => state
                    .trending
                    .iter()
                    .enumerate()
                    .map(|(i, r)| ViewItem {
                        title: highlight_sanitized(&r.title, &state.sanitized),
                        slug: r.slug.clone(),
                        path: r.detail_path(detail_prefix),
                        score: None,
                        selected: selected == Some(i),
                    })
                    .collect(),
                ViewMode::Empty => Vec::new(),
            }
        };

        let empty_message = (state.visible && mode == ViewMode::Empty)
            .then(|| format!("No results for \"{}\"", state.sanitized));

        Self {
            visible: state.visible,
            query: state.query.clone(),
            loading: state.status == dialect_core::SearchStatus::Pending,
            mode,
            items,
            selected,
            scroll_to: selected,
            empty_message,
        }
    }
}
