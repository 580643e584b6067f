use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source image not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Invalid pair name: {0}")]
    InvalidName(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, Error>;
