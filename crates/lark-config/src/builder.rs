//! Serializable configuration layers handed to the external bundler.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Target ECMAScript version for transpilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EsTarget {
    ES2015,
    ES2016,
    ES2017,
    ES2018,
    ES2019,
    ES2020,
    ES2021,
    #[default]
    ES2022,
    ES2023,
    ESNext,
}

/// Output module format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Es,
    Cjs,
}

/// Naming patterns for generated output files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputNaming {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_file_names: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_file_names: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_file_names: Option<String>,
}

/// Library output description: a single deterministic ES module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibOptions {
    pub entry: PathBuf,
    pub file_name: String,
    pub formats: Vec<OutputFormat>,
}

impl Default for LibOptions {
    fn default() -> Self {
        Self {
            entry: PathBuf::from("src/index.ts"),
            file_name: "index.mjs".to_string(),
            formats: vec![OutputFormat::Es],
        }
    }
}

/// Build-phase configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    pub out_dir: PathBuf,

    pub chunk_size_warning_limit: u32,

    pub report_compressed_size: bool,

    pub sourcemap: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<EsTarget>,

    pub output: OutputNaming,

    /// Present only for library projects.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lib: Option<LibOptions>,

    /// Import paths never inlined into the bundle.
    pub external: Vec<String>,
}

impl Default for BuildSection {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("dist"),
            chunk_size_warning_limit: 2000,
            report_compressed_size: false,
            sourcemap: false,
            target: None,
            output: OutputNaming::default(),
            lib: None,
            external: Vec::new(),
        }
    }
}

/// Code-transform policies applied by the bundler's transformer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformSection {
    /// Statement kinds stripped from the output.
    pub drop: Vec<String>,

    pub legal_comments: String,
}

impl Default for TransformSection {
    fn default() -> Self {
        Self {
            drop: Vec::new(),
            legal_comments: "none".to_string(),
        }
    }
}

/// Dev-server knobs the bundler consumes when serving.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Listen on all addresses.
    pub host: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Files pre-transformed when the dev server boots.
    pub warmup: Vec<String>,
}

/// One configuration layer for the external bundler.
///
/// Layers deep-merge in precedence order (common < kind-specific < user
/// overrides); see [`crate::merge`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    pub base: String,
    pub build: BuildSection,
    pub transform: TransformSection,
    pub server: ServerSection,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            base: "/".to_string(),
            build: BuildSection::default(),
            transform: TransformSection::default(),
            server: ServerSection::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_section_defaults() {
        let build = BuildSection::default();
        assert_eq!(build.out_dir, PathBuf::from("dist"));
        assert_eq!(build.chunk_size_warning_limit, 2000);
        assert!(!build.report_compressed_size);
        assert!(!build.sourcemap);
        assert!(build.target.is_none());
        assert!(build.lib.is_none());
        assert!(build.external.is_empty());
    }

    #[test]
    fn lib_options_default_to_single_es_module() {
        let lib = LibOptions::default();
        assert_eq!(lib.entry, PathBuf::from("src/index.ts"));
        assert_eq!(lib.file_name, "index.mjs");
        assert_eq!(lib.formats, vec![OutputFormat::Es]);
    }

    #[test]
    fn es_target_serializes_lowercase() {
        let value = serde_json::to_value(EsTarget::ES2020).unwrap();
        assert_eq!(value, serde_json::json!("es2020"));
    }

    #[test]
    fn absent_optionals_are_not_serialized() {
        let value = serde_json::to_value(BuilderConfig::default()).unwrap();
        assert!(value["build"].get("target").is_none());
        assert!(value["build"].get("lib").is_none());
    }
}
