use crate::core::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Suffix appended to the full image file name to name its text file
pub const TEXT_SUFFIX: &str = ".txt";

/// Compound suffix of a text file paired with a canonical image
pub const PAIRED_TEXT_SUFFIX: &str = ".jpg.txt";

/// Extension of images written by the save operation
pub const CANONICAL_IMAGE_EXT: &str = "jpg";

/// Which side of a pair a path is on, decided by its file name alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairRole {
    Image,
    Text,
}

/// Classify a path by the pairing convention without touching the disk
pub fn pair_role(path: &Path) -> Option<PairRole> {
    let name = path.file_name()?.to_str()?;

    if name.ends_with(PAIRED_TEXT_SUFFIX) {
        return Some(PairRole::Text);
    }

    if is_image_file(path) {
        return Some(PairRole::Image);
    }

    None
}

/// Check if a file has one of the image extensions a pair may use
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_lowercase().as_str(), "jpg" | "jpeg" | "png"))
        .unwrap_or(false)
}

/// Identifier shared by both members of the pair `path` belongs to
///
/// `X.jpg`, `X.jpeg`, `X.png` and `X.jpg.txt` all map to `X`.
pub fn pair_identifier(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;

    match pair_role(path)? {
        PairRole::Text => Some(name[..name.len() - PAIRED_TEXT_SUFFIX.len()].to_string()),
        PairRole::Image => path.file_stem()?.to_str().map(str::to_string),
    }
}

/// Canonical image path for `name` inside `dir`
pub fn image_path_for(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}.{}", name, CANONICAL_IMAGE_EXT))
}

/// Canonical text path for `name` inside `dir`
pub fn text_path_for(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{}{}", name, PAIRED_TEXT_SUFFIX))
}

/// Text file paired with an image: the image file name with `.txt` appended
pub fn text_path_for_image(image: &Path) -> Option<PathBuf> {
    let name = image.file_name()?.to_str()?;
    Some(image.with_file_name(format!("{}{}", name, TEXT_SUFFIX)))
}

/// Find the existing counterpart of a pair member
///
/// A `.jpg.txt` file pairs with `.jpg`, falling back to `.jpeg`. A `.jpg`,
/// `.jpeg` or `.png` image (any case) pairs with `<stem>.jpg.txt`. Only
/// existence is checked, never contents.
pub fn find_counterpart(path: &Path) -> Option<PathBuf> {
    let id = pair_identifier(path)?;

    let candidates: Vec<PathBuf> = match pair_role(path)? {
        PairRole::Text => vec![
            path.with_file_name(format!("{}.jpg", id)),
            path.with_file_name(format!("{}.jpeg", id)),
        ],
        PairRole::Image => vec![path.with_file_name(format!("{}{}", id, PAIRED_TEXT_SUFFIX))],
    };

    candidates.into_iter().find(|candidate| candidate.is_file())
}

/// Whether `path` is a pair member, and its counterpart when it is
pub fn is_pair(path: &Path) -> (bool, Option<PathBuf>) {
    match find_counterpart(path) {
        Some(counterpart) => (true, Some(counterpart)),
        None => (false, None),
    }
}

/// Validate a pair name before it is used as a file stem
pub fn validate_name(name: &str) -> Result<()> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(Error::InvalidName("name is empty".to_string()));
    }

    if trimmed != name {
        return Err(Error::InvalidName(format!(
            "name '{}' has leading or trailing whitespace",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidName(format!(
            "name '{}' contains a path separator",
            name
        )));
    }

    // Also rules out the `.` and `..` components
    if name.starts_with('.') {
        return Err(Error::InvalidName(format!(
            "name '{}' must not start with '.'",
            name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_pair_role() {
        assert_eq!(pair_role(Path::new("a.jpg")), Some(PairRole::Image));
        assert_eq!(pair_role(Path::new("a.JPEG")), Some(PairRole::Image));
        assert_eq!(pair_role(Path::new("a.Png")), Some(PairRole::Image));
        assert_eq!(pair_role(Path::new("a.jpg.txt")), Some(PairRole::Text));
        assert_eq!(pair_role(Path::new("a.txt")), None);
        assert_eq!(pair_role(Path::new("a.gif")), None);
        assert_eq!(pair_role(Path::new("noext")), None);
    }

    #[test]
    fn test_pair_identifier() {
        assert_eq!(pair_identifier(Path::new("/x/cat.jpg")).as_deref(), Some("cat"));
        assert_eq!(pair_identifier(Path::new("/x/cat.jpeg")).as_deref(), Some("cat"));
        assert_eq!(pair_identifier(Path::new("/x/cat.png")).as_deref(), Some("cat"));
        assert_eq!(pair_identifier(Path::new("/x/cat.jpg.txt")).as_deref(), Some("cat"));
        assert_eq!(pair_identifier(Path::new("/x/my.cat.jpg")).as_deref(), Some("my.cat"));
        assert_eq!(pair_identifier(Path::new("/x/cat.txt")), None);
    }

    #[test]
    fn test_text_name_appends_suffix() {
        let dir = Path::new("/store");
        assert_eq!(image_path_for(dir, "cat"), PathBuf::from("/store/cat.jpg"));
        assert_eq!(text_path_for(dir, "cat"), PathBuf::from("/store/cat.jpg.txt"));
        assert_eq!(
            text_path_for_image(Path::new("/store/cat.jpg")),
            Some(PathBuf::from("/store/cat.jpg.txt"))
        );
    }

    #[test]
    fn test_is_pair_image_to_text() {
        let temp_dir = TempDir::new().unwrap();
        let image = temp_dir.path().join("cat.jpg");
        let text = temp_dir.path().join("cat.jpg.txt");
        fs::write(&image, b"img").unwrap();

        assert_eq!(is_pair(&image), (false, None));

        fs::write(&text, "note").unwrap();
        assert_eq!(is_pair(&image), (true, Some(text.clone())));
        assert_eq!(is_pair(&text), (true, Some(image)));
    }

    #[test]
    fn test_is_pair_uppercase_and_png_images() {
        let temp_dir = TempDir::new().unwrap();
        let upper = temp_dir.path().join("dog.JPG");
        let png = temp_dir.path().join("bird.png");
        fs::write(&upper, b"img").unwrap();
        fs::write(&png, b"img").unwrap();
        fs::write(temp_dir.path().join("dog.jpg.txt"), "").unwrap();
        fs::write(temp_dir.path().join("bird.jpg.txt"), "").unwrap();

        assert_eq!(is_pair(&upper), (true, Some(temp_dir.path().join("dog.jpg.txt"))));
        assert_eq!(is_pair(&png), (true, Some(temp_dir.path().join("bird.jpg.txt"))));
    }

    #[test]
    fn test_is_pair_text_falls_back_to_jpeg() {
        let temp_dir = TempDir::new().unwrap();
        let text = temp_dir.path().join("fox.jpg.txt");
        let jpeg = temp_dir.path().join("fox.jpeg");
        fs::write(&text, "note").unwrap();

        assert_eq!(is_pair(&text), (false, None));

        fs::write(&jpeg, b"img").unwrap();
        assert_eq!(is_pair(&text), (true, Some(jpeg)));

        let jpg = temp_dir.path().join("fox.jpg");
        fs::write(&jpg, b"img").unwrap();
        assert_eq!(is_pair(&text), (true, Some(jpg)));
    }

    #[test]
    fn test_is_pair_other_files() {
        let temp_dir = TempDir::new().unwrap();
        let plain = temp_dir.path().join("notes.txt");
        fs::write(&plain, "x").unwrap();
        fs::write(temp_dir.path().join("notes.jpg"), b"img").unwrap();

        assert_eq!(is_pair(&plain), (false, None));
        assert_eq!(is_pair(&temp_dir.path().join("missing.gif")), (false, None));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("holiday-2024").is_ok());
        assert!(validate_name("my photo").is_ok());
        assert!(validate_name("a..b").is_ok());
        assert!(validate_name("trailing..").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(" padded").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("a\\b").is_err());
        assert!(validate_name("..").is_err());
        assert!(validate_name(".").is_err());
        assert!(validate_name(".hidden").is_err());
    }
}
