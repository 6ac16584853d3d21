use std::path::Path;

use async_trait::async_trait;
use tracing::debug;

use dialect_core::error::Result;
use dialect_core::query::{OrderBy, RecordQuery};
use dialect_core::traits::RecordStore;
use dialect_core::types::SearchableRecord;

use crate::loader::load_records;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<SearchableRecord>,
}

impl MemoryStore {
    pub fn new(records: Vec<SearchableRecord>) -> Self {
        Self { records }
    }

    pub fn from_dir(dir: &Path) -> Result<Self> {
        Ok(Self::new(load_records(dir)?))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Filter, order and limit exactly as a remote table would.
    pub fn select(&self, query: &RecordQuery) -> Vec<SearchableRecord> {
        let mut rows: Vec<SearchableRecord> =
            self.records.iter().filter(|r| query.filter.matches(r)).cloned().collect();
        match query.order_by {
            OrderBy::CreatedAtDesc => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            OrderBy::CreatedAtAsc => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        }
        rows.truncate(query.limit);
        rows
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn query_records(&self, query: &RecordQuery) -> Result<Vec<SearchableRecord>> {
        let rows = self.select(query);
        debug!(predicates = query.filter.any_of.len(), rows = rows.len(), "memory store query");
        Ok(rows)
    }
}
