use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::sanitize::sanitize;

/// A run of text, marked when it matched the query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub is_match: bool,
}

impl Segment {
    pub fn plain(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_match: false }
    }

    pub fn matched(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_match: true }
    }
}

/// Split `text` into alternating plain and matched segments.
///
/// The whole sanitized query is matched literally and case-insensitively.
/// An empty query leaves `text` as a single plain segment; empty text yields
/// no segments at all.
pub fn highlight(text: &str, raw_query: &str) -> Vec<Segment> {
    highlight_sanitized(text, &sanitize(raw_query))
}

/// Like [`highlight`], for a query that was already sanitized with the
/// caller's own length cap.
pub fn highlight_sanitized(text: &str, query: &str) -> Vec<Segment> {
    if query.is_empty() {
        return unhighlighted(text);
    }

    let pattern = match RegexBuilder::new(&regex::escape(query)).case_insensitive(true).build() {
        Ok(pattern) => pattern,
        Err(e) => {
            warn!(error = %e, query = %query, "highlight pattern rejected, rendering plain text");
            return unhighlighted(text);
        }
    };

    let mut segments = Vec::new();
    let mut cursor = 0;
    for m in pattern.find_iter(text) {
        if m.start() > cursor {
            segments.push(Segment::plain(&text[cursor..m.start()]));
        }
        segments.push(Segment::matched(m.as_str()));
        cursor = m.end();
    }
    if cursor < text.len() {
        segments.push(Segment::plain(&text[cursor..]));
    }
    segments
}

/// Flatten segments back into a string, wrapping matches in `open`/`close`.
pub fn to_marked(segments: &[Segment], open: &str, close: &str) -> String {
    let mut out = String::new();
    for s in segments {
        if s.is_match {
            out.push_str(open);
            out.push_str(&s.text);
            out.push_str(close);
        } else {
            out.push_str(&s.text);
        }
    }
    out
}

fn unhighlighted(text: &str) -> Vec<Segment> {
    if text.is_empty() { Vec::new() } else { vec![Segment::plain(text)] }
}
