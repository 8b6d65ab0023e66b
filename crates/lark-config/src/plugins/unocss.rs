//! Utility-class generator integration.
//!
//! The CSS engine is third-party; this entry carries its configuration into
//! the pipeline.

use std::borrow::Cow;

use async_trait::async_trait;

use crate::error::Result;
use crate::plugin::Plugin;

#[derive(Debug, Clone)]
pub struct UnocssPlugin {
    config_file: Option<String>,
}

impl UnocssPlugin {
    pub fn new() -> Self {
        Self { config_file: None }
    }

    /// Point the engine at an explicit config file instead of discovery.
    pub fn with_config_file(mut self, path: impl Into<String>) -> Self {
        self.config_file = Some(path.into());
        self
    }

    pub fn config_file(&self) -> Option<&str> {
        self.config_file.as_deref()
    }
}

impl Default for UnocssPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Plugin for UnocssPlugin {
    fn name(&self) -> Cow<'static, str> {
        "lark:unocss".into()
    }

    async fn build_start(&self) -> Result<()> {
        match &self.config_file {
            Some(path) => tracing::debug!("utility-class engine configured from {path}"),
            None => tracing::debug!("utility-class engine using config discovery"),
        }
        Ok(())
    }
}
