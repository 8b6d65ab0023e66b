//! Component auto-resolution: scans the configured component directories and
//! writes a global-components declaration file so templates can use them
//! without imports.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use lark_util::{recursive_directory, to_posix_path};

use crate::error::Result;
use crate::plugin::Plugin;

const COMPONENT_EXTENSIONS: [&str; 3] = ["vue", "tsx", "jsx"];

#[derive(Debug)]
pub struct ComponentsPlugin {
    root: PathBuf,
    dirs: Vec<String>,
    dts: String,
}

impl ComponentsPlugin {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            dirs: vec!["src/components".to_string()],
            dts: "types/components.d.ts".to_string(),
        }
    }

    pub fn with_dirs(mut self, dirs: Vec<String>) -> Self {
        self.dirs = dirs;
        self
    }

    fn collect_components(&self) -> Result<Vec<(String, String)>> {
        let mut components = Vec::new();
        for dir in &self.dirs {
            let path = self.root.join(dir);
            if !path.is_dir() {
                tracing::debug!("component directory {} not present", path.display());
                continue;
            }
            for file in recursive_directory(&path)? {
                let Some(extension) = file.path.extension().and_then(|ext| ext.to_str()) else {
                    continue;
                };
                if !COMPONENT_EXTENSIONS.contains(&extension) {
                    continue;
                }
                let Some(stem) = file.path.file_stem().and_then(|stem| stem.to_str()) else {
                    continue;
                };
                let Ok(relative) = file.path.strip_prefix(&self.root) else {
                    continue;
                };
                components.push((pascal_case(stem), to_posix_path(relative)));
            }
        }
        components.sort();
        components.dedup();
        Ok(components)
    }

    fn render_declaration(components: &[(String, String)]) -> String {
        let mut out = String::from(
            "/* generated by lark:components, do not edit */\nexport {};\n\n\
             declare module 'vue' {\n  export interface GlobalComponents {\n",
        );
        for (name, path) in components {
            out.push_str(&format!(
                "    {name}: typeof import('../{path}')['default'];\n"
            ));
        }
        out.push_str("  }\n}\n");
        out
    }
}

fn pascal_case(name: &str) -> String {
    name.split(['-', '_', '.'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

#[async_trait]
impl Plugin for ComponentsPlugin {
    fn name(&self) -> Cow<'static, str> {
        "lark:components".into()
    }

    async fn build_start(&self) -> Result<()> {
        let components = self.collect_components()?;
        let declaration = Self::render_declaration(&components);
        let dts_path = self.root.join(&self.dts);
        if let Some(parent) = dts_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&dts_path, declaration).await?;
        tracing::debug!("{} global components declared", components.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn pascal_cases_file_names() {
        assert_eq!(pascal_case("user-avatar"), "UserAvatar");
        assert_eq!(pascal_case("data_table"), "DataTable");
        assert_eq!(pascal_case("Button"), "Button");
    }

    #[tokio::test]
    async fn declares_discovered_components() {
        let dir = TempDir::new().unwrap();
        let components = dir.path().join("src/components");
        fs::create_dir_all(components.join("table")).unwrap();
        fs::write(components.join("user-avatar.vue"), "<template/>").unwrap();
        fs::write(components.join("table/data-table.tsx"), "export default {}").unwrap();
        fs::write(components.join("styles.css"), "").unwrap();

        let plugin = ComponentsPlugin::new(dir.path());
        plugin.build_start().await.unwrap();

        let declaration = fs::read_to_string(dir.path().join("types/components.d.ts")).unwrap();
        assert!(declaration.contains("UserAvatar: typeof import('../src/components/user-avatar.vue')"));
        assert!(declaration.contains("DataTable: typeof import('../src/components/table/data-table.tsx')"));
        assert!(!declaration.contains("styles"));
    }

    #[tokio::test]
    async fn missing_component_directory_yields_empty_declaration() {
        let dir = TempDir::new().unwrap();
        let plugin = ComponentsPlugin::new(dir.path());
        plugin.build_start().await.unwrap();

        let declaration = fs::read_to_string(dir.path().join("types/components.d.ts")).unwrap();
        assert!(declaration.contains("GlobalComponents"));
        assert!(!declaration.contains("typeof import"));
    }
}
