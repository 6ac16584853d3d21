//! dialect-store
//!
//! A local `RecordStore` for development and tests: posts are held in memory,
//! optionally loaded from a directory of JSON files, and can be put behind an
//! artificial network delay.
pub mod latency;
pub mod loader;
pub mod memory;

pub use latency::LatencyStore;
pub use loader::load_records;
pub use memory::MemoryStore;
