use std::time::Duration;

use async_trait::async_trait;

use dialect_core::error::Result;
use dialect_core::query::RecordQuery;
use dialect_core::traits::RecordStore;
use dialect_core::types::SearchableRecord;

/// Delays every query by a fixed amount before delegating, to simulate a
/// round trip to the hosted backend.
pub struct LatencyStore<S> {
    inner: S,
    delay: Duration,
}

impl<S: RecordStore> LatencyStore<S> {
    pub fn new(inner: S, delay: Duration) -> Self {
        Self { inner, delay }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: RecordStore> RecordStore for LatencyStore<S> {
    async fn query_records(&self, query: &RecordQuery) -> Result<Vec<SearchableRecord>> {
        tokio::time::sleep(self.delay).await;
        self.inner.query_records(query).await
    }
}
