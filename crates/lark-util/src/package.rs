//! Package metadata access.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{Result, UtilError};

/// Subset of `package.json` the build tooling consumes.
///
/// Dependency tables keep their declaration order so derived lists (e.g.
/// external-package exclusions) stay stable across reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageJson {
    pub name: String,
    pub version: String,
    pub description: String,
    pub author: String,
    pub license: String,
    pub homepage: String,
    pub dependencies: IndexMap<String, String>,
    pub peer_dependencies: IndexMap<String, String>,
}

/// Read and parse `package.json` from a project root.
pub fn read_package_json(root: impl AsRef<Path>) -> Result<PackageJson> {
    let path = root.as_ref().join("package.json");
    if !path.is_file() {
        return Err(UtilError::PackageNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    serde_json::from_str(&content).map_err(|source| UtilError::PackageParse { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reads_dependencies_and_peers() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{
                "name": "@lark/demo",
                "version": "1.4.0",
                "dependencies": { "vue": "^3.4.0" },
                "peerDependencies": { "pinia": "^2.1.0" }
            }"#,
        )
        .unwrap();

        let package = read_package_json(dir.path()).unwrap();
        assert_eq!(package.name, "@lark/demo");
        assert_eq!(package.version, "1.4.0");
        assert!(package.dependencies.contains_key("vue"));
        assert!(package.peer_dependencies.contains_key("pinia"));
    }

    #[test]
    fn missing_manifest_errors() {
        let dir = TempDir::new().unwrap();
        let result = read_package_json(dir.path());
        assert!(matches!(result, Err(UtilError::PackageNotFound(_))));
    }

    #[test]
    fn invalid_json_errors() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), "{ not json").unwrap();
        let result = read_package_json(dir.path());
        assert!(matches!(result, Err(UtilError::PackageParse { .. })));
    }
}
