//! dialect-palette
//!
//! The command palette behind the site search box. See `engine` for the
//! debounce and staleness rules, `keyboard` for listener lifetime and `view`
//! for what the UI renders.
pub mod engine;
pub mod fetch;
pub mod keyboard;
pub mod view;

pub use engine::{KeyOutcome, SearchEngine};
pub use keyboard::{KeyboardHub, KeyboardSubscription};
pub use view::{PaletteView, ViewItem, ViewMode};
