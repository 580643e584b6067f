use super::error::{Error, Result};
use crate::storage::atomic::atomic_write;
use std::path::{Path, PathBuf};

/// Environment variable overriding the default storage root
pub const HOME_ENV_VAR: &str = "POLYGLOT_HOME";

/// File name of the index document inside the storage root
pub const INDEX_FILE_NAME: &str = "index.json";

/// Configuration for polyglot
#[derive(Debug, Clone)]
pub struct Config {
    /// Storage root holding pairs and the index
    pub base_dir: PathBuf,
    /// Path to the JSON index document
    pub index_path: PathBuf,
}

impl Config {
    /// Get the default storage root
    pub fn default_base_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(HOME_ENV_VAR).filter(|v| !v.is_empty()) {
            return Ok(PathBuf::from(dir));
        }

        dirs::home_dir()
            .ok_or_else(|| Error::Config("Could not determine home directory".to_string()))
            .map(|home| home.join("polyglot_files"))
    }

    /// Create a new configuration
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let base_dir = match base_dir {
            Some(dir) => dir,
            None => Self::default_base_dir()?,
        };
        let base_dir = absolutize(&base_dir)?;

        Ok(Self {
            index_path: base_dir.join(INDEX_FILE_NAME),
            base_dir,
        })
    }

    /// Create the storage root and an empty index if either is missing.
    ///
    /// Safe to call before every operation that touches the index.
    pub fn init(&self) -> Result<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        if !self.index_path.exists() {
            atomic_write(&self.index_path, "[]")?;
            tracing::info!(index = %self.index_path.display(), "created empty index");
        }
        Ok(())
    }

    /// Check if the storage root and index file exist
    pub fn is_initialized(&self) -> bool {
        self.base_dir.is_dir() && self.index_path.is_file()
    }
}

/// Resolve a relative path against the current directory
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}
