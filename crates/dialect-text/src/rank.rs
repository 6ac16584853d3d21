//! Additive lexical scorer.
//!
//! Per token, the title contributes at most one of the exact/prefix/substring
//! bonuses (checked in that order) and the content contributes independently.
//! Bonuses add up across tokens.

use std::cmp::Ordering;

use dialect_core::types::{ScoredResult, SearchableRecord};

pub const TITLE_EXACT: u32 = 100;
pub const TITLE_PREFIX: u32 = 50;
pub const TITLE_CONTAINS: u32 = 30;
pub const CONTENT_CONTAINS: u32 = 10;

/// Score one record. `tokens` are expected to come from `tokenize`, i.e. already lowercase.
pub fn score_record(record: &SearchableRecord, tokens: &[String]) -> u32 {
    let title = record.title.to_lowercase();
    let content = record.content.to_lowercase();
    tokens
        .iter()
        .map(|token| {
            let token = token.as_str();
            // exact-title only fires when the whole title is this one token
            let title_bonus = if title == token {
                TITLE_EXACT
            } else if title.starts_with(token) {
                TITLE_PREFIX
            } else if title.contains(token) {
                TITLE_CONTAINS
            } else {
                0
            };
            let content_bonus = if content.contains(token) { CONTENT_CONTAINS } else { 0 };
            title_bonus + content_bonus
        })
        .sum()
}

/// Score, sort (score desc, newest first, then id) and keep the top `limit`.
pub fn rank(records: Vec<SearchableRecord>, tokens: &[String], limit: usize) -> Vec<ScoredResult> {
    let mut scored: Vec<ScoredResult> = records
        .into_iter()
        .map(|record| {
            let score = score_record(&record, tokens);
            ScoredResult { record, score }
        })
        .collect();
    scored.sort_by(compare);
    scored.truncate(limit);
    scored
}

fn compare(a: &ScoredResult, b: &ScoredResult) -> Ordering {
    b.score
        .cmp(&a.score)
        .then_with(|| b.record.created_at.cmp(&a.record.created_at))
        .then_with(|| a.record.id.cmp(&b.record.id))
}
