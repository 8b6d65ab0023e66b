//! Recursive directory statting.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;

/// Size entry for a single file discovered during traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStats {
    pub path: PathBuf,
    pub size: u64,
}

/// Collect stats for every file under `root`, recursively.
///
/// Traversal errors (missing directory, permission) are fatal and propagate
/// to the caller; there is no partial-result mode.
pub fn recursive_directory(root: impl AsRef<Path>) -> Result<Vec<FileStats>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root.as_ref()) {
        let entry = entry?;
        if entry.file_type().is_file() {
            let size = entry.metadata()?.len();
            files.push(FileStats {
                path: entry.into_path(),
                size,
            });
        }
    }
    Ok(files)
}

/// Total byte size of a stats listing.
pub fn total_size(files: &[FileStats]) -> u64 {
    files.iter().map(|file| file.size).sum()
}

/// Render a path with forward slashes regardless of platform.
pub fn to_posix_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
