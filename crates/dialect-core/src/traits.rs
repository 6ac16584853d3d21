use async_trait::async_trait;

use crate::error::Result;
use crate::query::RecordQuery;
use crate::types::SearchableRecord;

/// Remote table of posts. Implementations own their timeout and retry policy;
/// callers treat every error as recoverable.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn query_records(&self, query: &RecordQuery) -> Result<Vec<SearchableRecord>>;
}

pub trait Navigator: Send + Sync {
    fn go_to(&self, path: &str);
}
