//! Shared lowest-precedence configuration layer.

use std::path::PathBuf;

use crate::builder::{BuildSection, BuilderConfig};

/// Base layer every project kind starts from.
pub fn common_config() -> BuilderConfig {
    BuilderConfig {
        build: BuildSection {
            out_dir: PathBuf::from("dist"),
            chunk_size_warning_limit: 2000,
            report_compressed_size: false,
            sourcemap: false,
            ..BuildSection::default()
        },
        ..BuilderConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_layer_disables_sourcemaps() {
        let config = common_config();
        assert!(!config.build.sourcemap);
        assert_eq!(config.build.chunk_size_warning_limit, 2000);
        assert_eq!(config.build.out_dir, PathBuf::from("dist"));
    }
}
