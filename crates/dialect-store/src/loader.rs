use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

use dialect_core::error::{Error, Result};
use dialect_core::types::SearchableRecord;

/// A post file holds either one record or an array of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum PostFile {
    Many(Vec<SearchableRecord>),
    One(SearchableRecord),
}

/// Load every `*.json` file under `dir`, recursively, in path order.
///
/// Files that fail to parse are skipped with a warning; unreadable files and a
/// missing directory are errors.
pub fn load_records(dir: &Path) -> Result<Vec<SearchableRecord>> {
    if !dir.is_dir() {
        return Err(Error::NotFound(format!("posts directory {}", dir.display())));
    }
    let files = list_json_files(dir);
    let mut records = Vec::new();
    for path in &files {
        let raw = fs::read_to_string(path)?;
        match serde_json::from_str::<PostFile>(&raw) {
            Ok(PostFile::Many(batch)) => records.extend(batch),
            Ok(PostFile::One(record)) => records.push(record),
            Err(e) => warn!(path = %path.display(), error = %e, "skipping malformed post file"),
        }
    }
    info!(files = files.len(), records = records.len(), dir = %dir.display(), "loaded posts");
    Ok(records)
}

fn list_json_files(root: &Path) -> Vec<PathBuf> {
    let mut json_files: Vec<PathBuf> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    json_files.sort();
    json_files
}
