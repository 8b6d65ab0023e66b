//! Ambient-import declaration file for compiler-provided globals.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::Result;
use crate::plugin::Plugin;

#[derive(Debug)]
pub struct AutoImportPlugin {
    root: PathBuf,
    dts: String,
    /// `(name, module)` pairs exposed as ambient globals.
    imports: Vec<(String, String)>,
}

impl AutoImportPlugin {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            dts: "types/auto-imports.d.ts".to_string(),
            imports: Vec::new(),
        }
    }

    pub fn with_imports(mut self, imports: Vec<(String, String)>) -> Self {
        self.imports = imports;
        self
    }

    fn render_declaration(&self) -> String {
        let mut out = String::from(
            "/* generated by lark:auto-import, do not edit */\nexport {};\n\ndeclare global {\n",
        );
        for (name, module) in &self.imports {
            out.push_str(&format!(
                "  const {name}: typeof import('{module}')['{name}'];\n"
            ));
        }
        out.push_str("}\n");
        out
    }
}

#[async_trait]
impl Plugin for AutoImportPlugin {
    fn name(&self) -> Cow<'static, str> {
        "lark:auto-import".into()
    }

    async fn build_start(&self) -> Result<()> {
        let dts_path = self.root.join(&self.dts);
        if let Some(parent) = dts_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&dts_path, self.render_declaration()).await?;
        Ok(())
    }
}
