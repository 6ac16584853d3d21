use std::fs;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use dialect_core::error::Error;
use dialect_core::query::{FieldPredicate, OrderBy, RecordField, RecordFilter, RecordQuery};
use dialect_core::traits::RecordStore;
use dialect_core::types::{SearchableRecord, Visibility};
use dialect_store::{LatencyStore, MemoryStore};

fn post(id: &str, title: &str, day: u32, visibility: Visibility) -> SearchableRecord {
    SearchableRecord {
        id: id.to_string(),
        title: title.to_string(),
        content: format!("body of {title}"),
        slug: id.to_string(),
        created_at: Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap(),
        visibility,
    }
}

fn sample() -> MemoryStore {
    MemoryStore::new(vec![
        post("a", "Rust traits", 1, Visibility::Public),
        post("b", "Rust macros", 3, Visibility::Public),
        post("c", "Rust drafts", 5, Visibility::Private),
        post("d", "Go channels", 4, Visibility::Public),
    ])
}

#[tokio::test]
async fn filters_orders_and_limits() -> anyhow::Result<()> {
    let store = sample();
    let query = RecordQuery::new(
        RecordFilter::public().or(FieldPredicate::contains(RecordField::Title, "rust")),
        OrderBy::CreatedAtDesc,
        20,
    );
    let ids: Vec<String> = store.query_records(&query).await?.into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["b", "a"]);

    let oldest = RecordQuery::new(RecordFilter::public(), OrderBy::CreatedAtAsc, 2);
    let ids: Vec<String> = store.query_records(&oldest).await?.into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["a", "b"]);
    Ok(())
}

#[tokio::test]
async fn content_predicates_are_or_combined_with_title() -> anyhow::Result<()> {
    let store = sample();
    let query = RecordQuery::new(
        RecordFilter::public()
            .or(FieldPredicate::contains(RecordField::Title, "nothing"))
            .or(FieldPredicate::contains(RecordField::Content, "CHANNELS")),
        OrderBy::CreatedAtDesc,
        20,
    );
    let rows = store.query_records(&query).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "d");
    Ok(())
}

#[test]
fn loads_single_and_array_files_and_skips_garbage() {
    let tmp = TempDir::new().unwrap();
    let nested = tmp.path().join("2024");
    fs::create_dir_all(&nested).unwrap();
    fs::write(
        tmp.path().join("one.json"),
        r#"{"id":"1","title":"Hello","content":"hi","slug":"hello","createdAt":"2024-01-01T00:00:00Z","visibility":"public"}"#,
    )
    .unwrap();
    fs::write(
        nested.join("many.json"),
        r#"[{"id":"2","title":"A","slug":"a","created_at":"2024-01-02T00:00:00Z","visibility":"public"},
            {"id":"3","title":"B","slug":"b","created_at":"2024-01-03T00:00:00Z"}]"#,
    )
    .unwrap();
    fs::write(tmp.path().join("broken.json"), "{ not json").unwrap();
    fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

    let store = MemoryStore::from_dir(tmp.path()).expect("load");
    assert_eq!(store.len(), 3);

    let public = store.select(&RecordQuery::new(RecordFilter::public(), OrderBy::CreatedAtDesc, 10));
    let ids: Vec<&str> = public.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "1"]);
}

#[test]
fn missing_directory_is_not_found() {
    let tmp = TempDir::new().unwrap();
    let err = MemoryStore::from_dir(&tmp.path().join("absent")).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[tokio::test(start_paused = true)]
async fn latency_store_delays_before_answering() -> anyhow::Result<()> {
    let store = LatencyStore::new(sample(), Duration::from_millis(250));
    let started = tokio::time::Instant::now();
    let rows = store
        .query_records(&RecordQuery::new(RecordFilter::public(), OrderBy::CreatedAtDesc, 1))
        .await?;
    assert!(started.elapsed() >= Duration::from_millis(250));
    assert_eq!(rows[0].id, "d");
    assert_eq!(store.inner().len(), 4);
    Ok(())
}
