//! Error types for configuration assembly.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicit project kind other than application, library or auto.
    #[error("unsupported project kind: {0}")]
    UnsupportedKind(String),

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("duplicate bundle asset: {0}")]
    DuplicateAsset(String),

    #[error(transparent)]
    Util(#[from] lark_util::UtilError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
