use dialect_core::config::PaletteSettings;
use dialect_core::error::Result;
use dialect_core::query::{FieldPredicate, OrderBy, RecordField, RecordFilter, RecordQuery};
use dialect_core::traits::RecordStore;
use dialect_core::types::SearchableRecord;
use dialect_text::tokenize;

/// Public posts whose title or content contains any query token, newest first.
///
/// Returns `None` for queries below `min_query_chars`; those never reach the store.
pub fn build_search_query(sanitized: &str, settings: &PaletteSettings) -> Option<RecordQuery> {
    if sanitized.chars().count() < settings.min_query_chars {
        return None;
    }
    let tokens = tokenize(sanitized);
    if tokens.is_empty() {
        return None;
    }
    let filter = tokens.iter().fold(RecordFilter::public(), |filter, token| {
        filter
            .or(FieldPredicate::contains(RecordField::Title, token.as_str()))
            .or(FieldPredicate::contains(RecordField::Content, token.as_str()))
    });
    Some(RecordQuery::new(filter, OrderBy::CreatedAtDesc, settings.remote_limit))
}

pub fn build_trending_query(limit: usize) -> RecordQuery {
    RecordQuery::new(RecordFilter::public(), OrderBy::CreatedAtDesc, limit)
}

/// Fetch candidate records for an already sanitized query.
pub async fn search<S>(store: &S, sanitized: &str, settings: &PaletteSettings) -> Result<Vec<SearchableRecord>>
where
    S: RecordStore + ?Sized,
{
    match build_search_query(sanitized, settings) {
        Some(query) => store.query_records(&query).await,
        None => Ok(Vec::new()),
    }
}
