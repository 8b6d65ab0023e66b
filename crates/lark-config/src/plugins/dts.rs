//! Type-declaration emission toggle for library builds.
//!
//! Declaration extraction itself is third-party; this entry carries the
//! emission options into the pipeline.

use std::borrow::Cow;

use async_trait::async_trait;

use crate::error::Result;
use crate::plugin::Plugin;

#[derive(Debug, Clone)]
pub struct DtsPlugin {
    log_level: String,
}

impl DtsPlugin {
    pub fn new() -> Self {
        // Declaration diagnostics are noisy; only surface errors by default.
        Self {
            log_level: "error".to_string(),
        }
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }
}

impl Default for DtsPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Plugin for DtsPlugin {
    fn name(&self) -> Cow<'static, str> {
        "lark:dts".into()
    }

    async fn build_start(&self) -> Result<()> {
        tracing::debug!(
            "declaration emission enabled, log level {}",
            self.log_level
        );
        Ok(())
    }
}
