use chrono::{DateTime, TimeZone, Utc};

use dialect_core::types::{SearchableRecord, Visibility};
use dialect_text::{rank, sanitize, score_record, tokenize};

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, day, 9, 0, 0).unwrap()
}

fn post(id: &str, title: &str, content: &str, created_at: DateTime<Utc>) -> SearchableRecord {
    SearchableRecord {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        slug: id.to_string(),
        created_at,
        visibility: Visibility::Public,
    }
}

fn titles(results: &[dialect_core::ScoredResult]) -> Vec<&str> {
    results.iter().map(|r| r.record.title.as_str()).collect()
}

#[test]
fn title_branches_are_checked_in_order() {
    let tokens = tokenize("python");
    assert_eq!(score_record(&post("a", "Python", "", at(1)), &tokens), 100);
    assert_eq!(score_record(&post("b", "Python Basics", "", at(1)), &tokens), 50);
    assert_eq!(score_record(&post("c", "Learn Python", "", at(1)), &tokens), 30);
    assert_eq!(score_record(&post("d", "Rust", "python bindings", at(1)), &tokens), 10);
    assert_eq!(score_record(&post("e", "Python", "about python", at(1)), &tokens), 110);
}

#[test]
fn bonuses_add_up_across_tokens() {
    let tokens = tokenize("rust async");
    let record = post("a", "Rust async patterns", "async rust in practice", at(1));
    // rust: prefix 50 + content 10; async: contains 30 + content 10
    assert_eq!(score_record(&record, &tokens), 100);
}

#[test]
fn prefix_match_outranks_substring_match() {
    let records = vec![
        post("basics", "Python Basics", "intro", at(1)),
        post("learn", "Learn Python", "deep dive into python", at(2)),
    ];
    let tokens = tokenize(&sanitize("python"));

    let ranked = rank(records, &tokens, 10);

    // "python basics" starts with the token (50); "learn python" only
    // contains it (30) plus a content hit (10).
    assert_eq!(titles(&ranked), vec!["Python Basics", "Learn Python"]);
    assert_eq!(ranked[0].score, 50);
    assert_eq!(ranked[1].score, 40);
}

#[test]
fn equal_scores_break_ties_newest_first() {
    let records = vec![
        post("old", "Tokio notes", "", at(1)),
        post("new", "Tokio tricks", "", at(9)),
        post("mid", "Tokio tips", "", at(5)),
    ];
    let ranked = rank(records, &tokenize("tokio"), 10);
    assert_eq!(titles(&ranked), vec!["Tokio tricks", "Tokio tips", "Tokio notes"]);
}

#[test]
fn ranking_ignores_input_order() {
    let make = || {
        vec![
            post("1", "Serde guide", "serde derive", at(3)),
            post("2", "Guide to serde", "", at(4)),
            post("3", "Serde", "", at(1)),
            post("4", "Traits", "serde impls", at(2)),
        ]
    };
    let tokens = tokenize("serde");
    let forward = rank(make(), &tokens, 10);
    let mut reversed_input = make();
    reversed_input.reverse();
    let backward = rank(reversed_input, &tokens, 10);

    assert_eq!(forward, backward);
    assert_eq!(titles(&forward), vec!["Serde", "Serde guide", "Guide to serde", "Traits"]);
}

#[test]
fn output_is_capped() {
    let records: Vec<_> = (1..=15).map(|d| post(&format!("p{d}"), &format!("Post {d}"), "", at(d))).collect();
    let ranked = rank(records, &tokenize("post"), 10);
    assert_eq!(ranked.len(), 10);
    // all tie on score, so the newest ten survive
    assert_eq!(ranked[0].record.id, "p15");
    assert_eq!(ranked[9].record.id, "p6");
}
