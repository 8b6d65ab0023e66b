//! Build-only dependency/size report.
//!
//! Collects per-output raw and gzip sizes at generate-bundle time and writes
//! a JSON stats file under the project cache path on close.

use std::borrow::Cow;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use flate2::Compression;
use flate2::write::GzEncoder;
use serde::Serialize;

use crate::error::Result;
use crate::plugin::{Bundle, Output, Plugin};

/// Stats file location relative to the project root.
pub const STATS_FILE: &str = "node_modules/.cache/visualizer/stats.json";

#[derive(Debug, Clone, Serialize)]
struct OutputStat {
    file_name: String,
    size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    gzip_size: Option<u64>,
}

#[derive(Debug)]
pub struct VisualizerPlugin {
    stats_path: PathBuf,
    gzip_size: bool,
    stats: Mutex<Vec<OutputStat>>,
}

impl VisualizerPlugin {
    pub fn new(root: &Path) -> Self {
        Self {
            stats_path: root.join(STATS_FILE),
            gzip_size: true,
            stats: Mutex::new(Vec::new()),
        }
    }

    pub fn stats_path(&self) -> &Path {
        &self.stats_path
    }

    fn gzip_len(data: &[u8]) -> std::io::Result<u64> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data)?;
        Ok(encoder.finish()?.len() as u64)
    }
}

#[async_trait]
impl Plugin for VisualizerPlugin {
    fn name(&self) -> Cow<'static, str> {
        "lark:visualizer".into()
    }

    async fn generate_bundle(&self, bundle: &mut Bundle) -> Result<()> {
        let mut collected = Vec::with_capacity(bundle.len());
        for output in bundle.outputs() {
            let data = match output {
                Output::Chunk(chunk) => chunk.code.as_bytes(),
                Output::Asset(asset) => asset.source.as_bytes(),
            };
            let gzip_size = if self.gzip_size {
                Some(Self::gzip_len(data)?)
            } else {
                None
            };
            collected.push(OutputStat {
                file_name: output.file_name().to_string(),
                size: output.size(),
                gzip_size,
            });
        }
        *self.stats.lock().unwrap() = collected;
        Ok(())
    }

    async fn close_bundle(&self) -> Result<()> {
        let stats = self.stats.lock().unwrap().clone();
        let json = serde_json::to_string_pretty(&stats)
            .map_err(|err| crate::error::ConfigError::InvalidValue(err.to_string()))?;
        if let Some(parent) = self.stats_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.stats_path, json).await?;
        tracing::info!("visualizer stats written to {}", self.stats_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::OutputChunk;
    use tempfile::TempDir;

    #[tokio::test]
    async fn writes_stats_with_gzip_sizes() {
        let dir = TempDir::new().unwrap();
        let plugin = VisualizerPlugin::new(dir.path());

        let mut bundle = Bundle::new();
        bundle.push(Output::Chunk(OutputChunk {
            file_name: "js/app-abc.js".to_string(),
            code: "const x = 1;".repeat(100),
            is_entry: true,
        }));
        plugin.generate_bundle(&mut bundle).await.unwrap();
        plugin.close_bundle().await.unwrap();

        let written = std::fs::read_to_string(plugin.stats_path()).unwrap();
        assert!(written.contains("\"file_name\": \"js/app-abc.js\""));
        assert!(written.contains("\"gzip_size\""));
    }

    #[tokio::test]
    async fn empty_bundle_writes_empty_stats() {
        let dir = TempDir::new().unwrap();
        let plugin = VisualizerPlugin::new(dir.path());

        let mut bundle = Bundle::new();
        plugin.generate_bundle(&mut bundle).await.unwrap();
        plugin.close_bundle().await.unwrap();

        let written = std::fs::read_to_string(plugin.stats_path()).unwrap();
        assert_eq!(written.trim(), "[]");
    }
}
