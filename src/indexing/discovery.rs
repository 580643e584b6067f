use crate::core::error::{Error, Result};
use crate::indexing::pairing::{text_path_for_image, CANONICAL_IMAGE_EXT};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// A canonical pair found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredPair {
    pub id: String,
    pub image: PathBuf,
    pub text: PathBuf,
}

/// Discover canonical pairs directly inside `root`
///
/// Only `<id>.jpg` images with an existing `<id>.jpg.txt` sibling count.
/// Subdirectories are not descended into. Results are ordered by file name.
pub fn discover_pairs(root: &Path) -> Result<Vec<DiscoveredPair>> {
    if !root.exists() {
        return Err(Error::Config(format!(
            "Directory does not exist: {}",
            root.display()
        )));
    }

    if !root.is_dir() {
        return Err(Error::Config(format!(
            "Path is not a directory: {}",
            root.display()
        )));
    }

    let mut pairs = Vec::new();

    // The storage root is scanned as-is: no ignore files, hidden files included
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .max_depth(Some(1))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    for result in walker {
        match result {
            Ok(entry) => {
                let path = entry.path();

                if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                    continue;
                }

                if !is_canonical_image(path) {
                    continue;
                }

                let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                    tracing::warn!(path = %path.display(), "skipping image with non UTF-8 name");
                    continue;
                };

                let Some(text) = text_path_for_image(path) else {
                    continue;
                };

                if !text.is_file() {
                    tracing::debug!(image = %path.display(), "image has no text sibling");
                    continue;
                }

                pairs.push(DiscoveredPair {
                    id: id.to_string(),
                    image: path.to_path_buf(),
                    text,
                });
            }
            Err(err) => {
                // Log but continue - some entries might be inaccessible
                tracing::warn!("failed to access entry during scan: {}", err);
            }
        }
    }

    Ok(pairs)
}

/// Check if a file uses the canonical image extension (exact, lower case)
pub fn is_canonical_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == CANONICAL_IMAGE_EXT)
        .unwrap_or(false)
}
