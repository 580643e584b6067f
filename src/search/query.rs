use crate::storage::index::Record;
use std::path::Path;

/// Normalize a raw query; `None` when nothing is left to search for
pub fn normalize_query(raw: &str) -> Option<String> {
    let q = raw.trim();
    if q.is_empty() {
        None
    } else {
        Some(q.to_lowercase())
    }
}

/// Read a text file for matching; unreadable files count as empty
pub fn read_text_lossy(path: &Path) -> String {
    match std::fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        Err(e) => {
            tracing::debug!(path = %path.display(), "treating unreadable text as empty: {}", e);
            String::new()
        }
    }
}

/// Check a single record against an already normalized query
pub fn record_matches(record: &Record, needle: &str) -> bool {
    if record.id.to_lowercase().contains(needle) {
        return true;
    }

    read_text_lossy(&record.text).to_lowercase().contains(needle)
}

/// Case-insensitive substring search over ids and text file contents.
///
/// Every text file is read fresh on each call. Results keep index order and
/// each record appears at most once. Empty or blank queries match nothing.
pub fn search_records(records: Vec<Record>, query: &str) -> Vec<Record> {
    let Some(needle) = normalize_query(query) else {
        return Vec::new();
    };

    records
        .into_iter()
        .filter(|record| record_matches(record, &needle))
        .collect()
}
