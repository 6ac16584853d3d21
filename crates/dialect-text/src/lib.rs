//! dialect-text
//!
//! Query hygiene and lexical relevance for the search palette: `sanitize`
//! cleans raw input, `highlight` splits titles into emphasized segments and
//! `rank` orders fetched records with an additive title/content scorer.
pub mod highlight;
pub mod rank;
pub mod sanitize;

pub use highlight::{highlight, highlight_sanitized, to_marked, Segment};
pub use rank::{rank, score_record};
pub use sanitize::{sanitize, sanitize_with_limit, tokenize, MAX_QUERY_CHARS, STRIPPED};
