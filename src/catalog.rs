use crate::core::config::{absolutize, Config};
use crate::core::error::{Error, Result};
use crate::indexing::convert::convert_to_jpeg;
use crate::indexing::pairing::{
    find_counterpart, image_path_for, pair_identifier, pair_role, text_path_for, validate_name,
    PairRole,
};
use crate::search::query::search_records;
use crate::storage::atomic::atomic_write;
use crate::storage::index::{IndexStore, Record};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Paths written by a successful save
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPair {
    pub image: PathBuf,
    pub text: PathBuf,
}

/// Both members of an existing pair, with the text loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairView {
    pub image: PathBuf,
    pub text_path: PathBuf,
    /// `None` when the text file could not be read as UTF-8
    pub text: Option<String>,
}

/// Entry point used by front ends to create, inspect and search pairs
#[derive(Debug, Clone)]
pub struct Catalog {
    config: Config,
    store: IndexStore,
}

impl Catalog {
    /// Create a catalog over the storage root in `config`.
    ///
    /// Nothing is created on disk until an operation needs it.
    pub fn new(config: Config) -> Self {
        let store = IndexStore::new(&config);
        Self { config, store }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &IndexStore {
        &self.store
    }

    /// Create the storage root and an empty index if either is missing
    pub fn ensure_storage(&self) -> Result<()> {
        self.config.init()
    }

    /// Save `image_source` and `text` as the pair `name` inside `destination_dir`.
    ///
    /// The image is re-encoded as `<name>.jpg` and the text written to
    /// `<name>.jpg.txt`, both atomically, before the index is touched. If
    /// the index update itself fails the files stay on disk and the error is
    /// returned; a later [`Catalog::rebuild`] picks them up when they live in
    /// the storage root.
    pub fn save_pair(
        &self,
        image_source: &Path,
        text: &str,
        destination_dir: &Path,
        name: &str,
    ) -> Result<SavedPair> {
        if !image_source.is_file() {
            return Err(Error::SourceNotFound(image_source.to_path_buf()));
        }
        validate_name(name)?;

        self.ensure_storage()?;
        let destination_dir = absolutize(destination_dir)?;
        std::fs::create_dir_all(&destination_dir)?;

        let image = image_path_for(&destination_dir, name);
        let text_path = text_path_for(&destination_dir, name);

        convert_to_jpeg(image_source, &image)?;
        atomic_write(&text_path, text)?;

        let record = Record::new(name, image.clone(), text_path.clone());
        if let Err(e) = self.store.add_or_replace(record) {
            tracing::error!(
                id = name,
                image = %image.display(),
                text = %text_path.display(),
                "pair files written but index update failed: {}",
                e
            );
            return Err(e);
        }

        tracing::info!(id = name, image = %image.display(), "saved pair");
        Ok(SavedPair {
            image,
            text: text_path,
        })
    }

    /// Whether `path` is one half of a pair, and the other half if so
    pub fn is_pair(&self, path: &Path) -> (bool, Option<PathBuf>) {
        crate::indexing::pairing::is_pair(path)
    }

    /// Resolve both halves of the pair `path` belongs to and read its text
    pub fn inspect_pair(&self, path: &Path) -> Option<PairView> {
        let counterpart = find_counterpart(path)?;

        let (image, text_path) = match pair_role(path)? {
            PairRole::Image => (path.to_path_buf(), counterpart),
            PairRole::Text => (counterpart, path.to_path_buf()),
        };

        let text = match std::fs::read_to_string(&text_path) {
            Ok(content) => Some(content),
            Err(e) => {
                tracing::warn!(path = %text_path.display(), "failed to read pair text: {}", e);
                None
            }
        };

        Some(PairView {
            image,
            text_path,
            text,
        })
    }

    /// Records whose id or text contains `query`, case-insensitively
    pub fn search(&self, query: &str) -> Result<Vec<Record>> {
        self.ensure_storage()?;
        let records = self.store.load()?;
        let results = search_records(records, query);
        tracing::debug!(query, matches = results.len(), "search finished");
        Ok(results)
    }

    /// Indexed records whose files still exist
    pub fn list_valid(&self) -> Result<Vec<Record>> {
        self.ensure_storage()?;
        self.store.load_valid()
    }

    /// Delete both files of the pair `path` belongs to and drop its record.
    ///
    /// Returns the names of the files actually removed. A path that is not
    /// part of a pair deletes nothing and leaves the index untouched. Only
    /// records pointing at one of the two deleted files are dropped, so a
    /// pair with the same id in another directory keeps its record.
    ///
    /// If removing the second file fails, the first one is already gone and
    /// the index is left as it was; the error is returned after logging the
    /// files that were removed.
    pub fn delete_pair(&self, path: &Path) -> Result<Vec<String>> {
        let Some(counterpart) = find_counterpart(path) else {
            tracing::debug!(path = %path.display(), "not a pair, nothing to delete");
            return Ok(Vec::new());
        };
        let path = absolutize(path)?;
        let counterpart = absolutize(&counterpart)?;
        let id = pair_identifier(&path).unwrap_or_default();

        let mut deleted = Vec::new();
        for file in [path.as_path(), counterpart.as_path()] {
            match std::fs::remove_file(file) {
                Ok(()) => {
                    let name = file
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    deleted.push(name);
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    tracing::debug!(path = %file.display(), "already gone");
                }
                Err(e) => {
                    tracing::error!(
                        id = %id,
                        failed = %file.display(),
                        removed = ?deleted,
                        "pair only partly deleted, index left unchanged: {}",
                        e
                    );
                    return Err(Error::Io(e));
                }
            }
        }

        self.ensure_storage()?;
        let pair_files = [path, counterpart];
        self.store
            .remove_where(|r| pair_files.contains(&r.image) || pair_files.contains(&r.text))?;

        tracing::info!(id = %id, files = ?deleted, "deleted pair");
        Ok(deleted)
    }

    /// Replace the index with the pairs found in the storage root
    pub fn rebuild(&self) -> Result<Vec<Record>> {
        self.ensure_storage()?;
        self.store.rebuild()
    }
}
