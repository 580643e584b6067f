use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::indexing::discovery::discover_pairs;
use crate::storage::atomic::atomic_write;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::PathBuf;

/// One catalogued pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Shared base name, unique within the index
    pub id: String,
    /// Path to the image file
    pub image: PathBuf,
    /// Path to the text file
    pub text: PathBuf,
}

impl Record {
    /// Create a new record
    pub fn new(id: impl Into<String>, image: impl Into<PathBuf>, text: impl Into<PathBuf>) -> Self {
        Self {
            id: id.into(),
            image: image.into(),
            text: text.into(),
        }
    }

    /// Both files of the pair are currently on disk
    pub fn is_valid(&self) -> bool {
        self.image.exists() && self.text.exists()
    }
}

/// What was found at the index path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexState {
    /// No index file
    Missing,
    /// The file exists but is not valid JSON or not a JSON array
    Corrupt { reason: String },
    Loaded(Vec<Record>),
}

/// JSON-backed store of pair records
///
/// Every mutation is a full read-modify-write of the index file with no
/// locking. Two overlapping writers lose updates: the later full rewrite
/// wins.
#[derive(Debug, Clone)]
pub struct IndexStore {
    config: Config,
}

impl IndexStore {
    /// Create a store handle without touching the disk
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Open the store, creating the storage root and an empty index if needed
    pub fn open(config: &Config) -> Result<Self> {
        config.init()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Read the index, telling a missing file apart from a corrupt one.
    ///
    /// An index that exists but cannot be read is an I/O error.
    pub fn load_state(&self) -> Result<IndexState> {
        let bytes = match std::fs::read(&self.config.index_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(IndexState::Missing),
            Err(e) => return Err(Error::Io(e)),
        };

        let entries = match serde_json::from_slice::<Vec<serde_json::Value>>(&bytes) {
            Ok(entries) => entries,
            Err(e) => {
                return Ok(IndexState::Corrupt {
                    reason: e.to_string(),
                })
            }
        };

        // A malformed entry is skipped on its own; the rest of the index survives
        let records = entries
            .into_iter()
            .enumerate()
            .filter_map(|(position, entry)| match serde_json::from_value::<Record>(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(
                        index = %self.config.index_path.display(),
                        position,
                        "skipping malformed index entry: {}",
                        e
                    );
                    None
                }
            })
            .collect();

        Ok(IndexState::Loaded(records))
    }

    /// Load all records, treating a missing or corrupt index as empty
    pub fn load(&self) -> Result<Vec<Record>> {
        match self.load_state()? {
            IndexState::Loaded(records) => Ok(records),
            IndexState::Missing => Ok(Vec::new()),
            IndexState::Corrupt { reason } => {
                tracing::warn!(
                    index = %self.config.index_path.display(),
                    "index is corrupt, treating as empty: {}",
                    reason
                );
                Ok(Vec::new())
            }
        }
    }

    /// Persist the full record list, replacing the index file
    pub fn save(&self, records: &[Record]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|e| Error::Index(format!("Failed to serialize index: {}", e)))?;
        atomic_write(&self.config.index_path, &json)
    }

    /// Insert a record, replacing any record with the same id
    pub fn add_or_replace(&self, record: Record) -> Result<()> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.id != record.id);
        let replaced = records.len() != before;

        tracing::info!(id = %record.id, replaced, "upserting index record");
        records.push(record);
        self.save(&records)
    }

    /// Remove the record with `id`; an unknown id is a no-op
    pub fn remove(&self, id: &str) -> Result<()> {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| r.id != id);

        if records.len() != before {
            tracing::info!(id, "removed index record");
        }
        self.save(&records)
    }

    /// Remove every record matching `predicate`
    pub fn remove_where<F>(&self, predicate: F) -> Result<()>
    where
        F: Fn(&Record) -> bool,
    {
        let mut records = self.load()?;
        let before = records.len();
        records.retain(|r| !predicate(r));

        let removed = before - records.len();
        if removed > 0 {
            tracing::info!(removed, "removed index records");
        }
        self.save(&records)
    }

    /// Records whose image and text both exist on disk
    pub fn load_valid(&self) -> Result<Vec<Record>> {
        let records = self.load()?;
        Ok(records.into_iter().filter(Record::is_valid).collect())
    }

    /// Recompute the index from the pairs in the storage root.
    ///
    /// The existing index content is discarded, including records pointing
    /// outside the storage root.
    pub fn rebuild(&self) -> Result<Vec<Record>> {
        let records: Vec<Record> = discover_pairs(&self.config.base_dir)?
            .into_iter()
            .map(|pair| Record::new(pair.id, pair.image, pair.text))
            .collect();

        self.save(&records)?;
        tracing::info!(count = records.len(), "rebuilt index from disk");
        Ok(records)
    }
}
