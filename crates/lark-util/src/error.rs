//! Error types for the utility crate.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, UtilError>;

#[derive(Debug, Error)]
pub enum UtilError {
    #[error("package manifest not found: {0}")]
    PackageNotFound(PathBuf),

    #[error("invalid package manifest {path}: {source}")]
    PackageParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("directory traversal failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
