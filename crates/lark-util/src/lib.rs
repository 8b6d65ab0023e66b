//! Shared host-side utilities for the lark build tooling: recursive
//! directory statting, content hashing, date formatting and package
//! metadata access.

pub mod date;
pub mod error;
pub mod fs;
pub mod hash;
pub mod package;

pub use date::{format_date, format_duration};
pub use error::{Result, UtilError};
pub use fs::{FileStats, recursive_directory, to_posix_path, total_size};
pub use hash::content_hash;
pub use package::{PackageJson, read_package_json};
