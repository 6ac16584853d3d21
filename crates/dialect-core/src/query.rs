//! Filter, ordering and limit for a single table query.
//!
//! Stores may translate these into their own query language; `RecordFilter::matches`
//! is the reference semantics for stores that evaluate filters locally.

use serde::{Deserialize, Serialize};

use crate::types::{SearchableRecord, Visibility};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecordField {
    Title,
    Content,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum FieldPredicate {
    /// Case-insensitive substring match.
    Contains { field: RecordField, needle: String },
}

impl FieldPredicate {
    pub fn contains(field: RecordField, needle: impl Into<String>) -> Self {
        Self::Contains { field, needle: needle.into() }
    }

    pub fn matches(&self, record: &SearchableRecord) -> bool {
        match self {
            Self::Contains { field, needle } => {
                let haystack = match field {
                    RecordField::Title => &record.title,
                    RecordField::Content => &record.content,
                };
                haystack.to_lowercase().contains(&needle.to_lowercase())
            }
        }
    }
}

/// `visibility` is an equality constraint; `any_of` predicates are OR-combined
/// and an empty list places no constraint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordFilter {
    pub visibility: Option<Visibility>,
    pub any_of: Vec<FieldPredicate>,
}

impl RecordFilter {
    pub fn public() -> Self {
        Self { visibility: Some(Visibility::Public), any_of: Vec::new() }
    }

    pub fn or(mut self, predicate: FieldPredicate) -> Self {
        self.any_of.push(predicate);
        self
    }

    pub fn matches(&self, record: &SearchableRecord) -> bool {
        if let Some(visibility) = self.visibility {
            if record.visibility != visibility {
                return false;
            }
        }
        self.any_of.is_empty() || self.any_of.iter().any(|p| p.matches(record))
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderBy {
    #[default]
    CreatedAtDesc,
    CreatedAtAsc,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecordQuery {
    pub filter: RecordFilter,
    pub order_by: OrderBy,
    pub limit: usize,
}

impl RecordQuery {
    pub fn new(filter: RecordFilter, order_by: OrderBy, limit: usize) -> Self {
        Self { filter, order_by, limit }
    }

    /// Needles of all substring predicates, in insertion order.
    pub fn needles(&self) -> impl Iterator<Item = &str> {
        self.filter.any_of.iter().map(|p| match p {
            FieldPredicate::Contains { needle, .. } => needle.as_str(),
        })
    }
}
