//! Plugin lifecycle contract and bundle model.
//!
//! The external bundler owns plugin execution: it calls the lifecycle hooks
//! in build order on every plugin of the resolved list. This crate only
//! assembles that list; the hook signatures here are the contract both sides
//! agree on. All hooks default to no-ops so plugins implement exactly the
//! hooks they care about.

use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;

use crate::builder::BuilderConfig;
use crate::error::{ConfigError, Result};

/// One unit of build-pipeline behavior, driven by the external bundler.
#[async_trait]
pub trait Plugin: Send + Sync {
    fn name(&self) -> Cow<'static, str>;

    /// Called once with the final merged configuration, before the build.
    async fn config_resolved(&self, _config: &BuilderConfig) -> Result<()> {
        Ok(())
    }

    async fn build_start(&self) -> Result<()> {
        Ok(())
    }

    async fn build_end(&self) -> Result<()> {
        Ok(())
    }

    /// Rewrite the entry HTML page. Returns the (possibly unchanged) markup.
    async fn transform_index_html(&self, html: String) -> Result<String> {
        Ok(html)
    }

    /// Inspect or extend the generated bundle before it is written.
    async fn generate_bundle(&self, _bundle: &mut Bundle) -> Result<()> {
        Ok(())
    }

    /// Called after the bundle has been written to disk.
    async fn close_bundle(&self) -> Result<()> {
        Ok(())
    }
}

/// Shared handle to a plugin instance.
///
/// Plugins are held behind `Arc` so the resolved list can be handed to the
/// bundler while table construction keeps no ownership; mutable plugin state
/// lives behind interior mutability.
pub type SharedPlugin = Arc<dyn Plugin>;

/// Wrap a concrete plugin for the resolved list.
pub fn shared<P: Plugin + 'static>(plugin: P) -> SharedPlugin {
    Arc::new(plugin)
}

/// Asset payload, textual or raw bytes (e.g. compressed siblings).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Text(String),
    Binary(Vec<u8>),
}

impl AssetSource {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(text) => text.as_bytes(),
            Self::Binary(bytes) => bytes,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Binary(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl From<String> for AssetSource {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for AssetSource {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for AssetSource {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Binary(bytes)
    }
}

/// A generated code chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputChunk {
    pub file_name: String,
    pub code: String,
    pub is_entry: bool,
}

/// A generated non-code asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputAsset {
    pub file_name: String,
    pub source: AssetSource,
}

/// One bundle output, chunk or asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Chunk(OutputChunk),
    Asset(OutputAsset),
}

impl Output {
    pub fn file_name(&self) -> &str {
        match self {
            Self::Chunk(chunk) => &chunk.file_name,
            Self::Asset(asset) => &asset.file_name,
        }
    }

    /// Byte size of the output payload.
    pub fn size(&self) -> u64 {
        match self {
            Self::Chunk(chunk) => chunk.code.len() as u64,
            Self::Asset(asset) => asset.source.len() as u64,
        }
    }
}

/// Ordered collection of outputs, mutable from `generate_bundle`.
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    outputs: Vec<Output>,
}

impl Bundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, output: Output) {
        self.outputs.push(output);
    }

    /// Add an asset, rejecting a file name already present in the bundle.
    pub fn emit_asset(&mut self, file_name: impl Into<String>, source: impl Into<AssetSource>) -> Result<()> {
        let file_name = file_name.into();
        if self.contains(&file_name) {
            return Err(ConfigError::DuplicateAsset(file_name));
        }
        self.outputs.push(Output::Asset(OutputAsset {
            file_name,
            source: source.into(),
        }));
        Ok(())
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.outputs.iter().any(|output| output.file_name() == file_name)
    }

    pub fn get(&self, file_name: &str) -> Option<&Output> {
        self.outputs.iter().find(|output| output.file_name() == file_name)
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Output> {
        self.outputs.iter_mut()
    }

    pub fn chunks_mut(&mut self) -> impl Iterator<Item = &mut OutputChunk> {
        self.outputs.iter_mut().filter_map(|output| match output {
            Output::Chunk(chunk) => Some(chunk),
            Output::Asset(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}
