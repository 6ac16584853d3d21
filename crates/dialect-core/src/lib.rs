#![deny(warnings)]
#![deny(dead_code)]
#![deny(unused_variables)]
#![deny(unused_imports)]

pub mod config;
pub mod error;
pub mod query;
pub mod traits;
pub mod types;

pub use config::{Config, PaletteSettings};
pub use error::{Error, Result};
pub use query::{FieldPredicate, OrderBy, RecordField, RecordFilter, RecordQuery};
pub use traits::{Navigator, RecordStore};
pub use types::{Key, RecordId, ScoredResult, SearchStatus, SearchableRecord, Visibility};
