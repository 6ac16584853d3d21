//! Domain types shared by the store, the ranker and the palette.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type RecordId = String;

/// Only `Public` records are ever returned to a search surface.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    #[default]
    Private,
}

/// A post as the remote table returns it.
///
/// - `id`: unique row identifier
/// - `title`/`content`: searchable text, `content` is the long-form body
/// - `slug`: path segment used to build the detail route
/// - `created_at`: publication time, newest first in every listing
/// - `visibility`: a missing value deserializes as `Private`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchableRecord {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub slug: String,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub visibility: Visibility,
}

impl SearchableRecord {
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Route of the record's detail page, e.g. `/show/my-post`.
    pub fn detail_path(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.slug)
    }
}

/// A record with its relevance score for one query. Never updated in place;
/// every response is scored from scratch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoredResult {
    #[serde(flatten)]
    pub record: SearchableRecord,
    pub score: u32,
}

/// Lifecycle of the most recent search request.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum SearchStatus {
    #[default]
    Idle,
    Pending,
    Resolved,
    Errored,
}

/// Keys the palette reacts to while it is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowDown,
    ArrowUp,
    Enter,
    Escape,
    Other,
}
