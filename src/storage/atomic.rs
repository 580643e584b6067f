use crate::core::error::{Error, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write text to a file.
///
/// See [`atomic_write_bytes`].
pub fn atomic_write(path: &Path, content: &str) -> Result<()> {
    atomic_write_bytes(path, content.as_bytes())
}

/// Atomically write bytes to a file.
///
/// The content goes to a temporary file in the target's parent directory,
/// which is synced and then renamed over the target. Readers observe either
/// the previous complete file or the new one. On failure the temporary file
/// is removed when it is dropped and the target is left untouched.
pub fn atomic_write_bytes(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(contents)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;

    tmp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::debug!(path = %path.display(), bytes = contents.len(), "atomic write");
    Ok(())
}
