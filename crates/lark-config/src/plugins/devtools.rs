//! Dev-tooling integration, registered only when serving.

use std::borrow::Cow;

use async_trait::async_trait;

use crate::error::Result;
use crate::plugin::Plugin;

#[derive(Debug, Default)]
pub struct DevtoolsPlugin {
    launch_editor: String,
}

impl DevtoolsPlugin {
    pub fn new() -> Self {
        Self {
            launch_editor: "code".to_string(),
        }
    }

    pub fn with_launch_editor(mut self, editor: impl Into<String>) -> Self {
        self.launch_editor = editor.into();
        self
    }
}

#[async_trait]
impl Plugin for DevtoolsPlugin {
    fn name(&self) -> Cow<'static, str> {
        "lark:devtools".into()
    }

    async fn build_start(&self) -> Result<()> {
        tracing::info!(
            "devtools overlay enabled, launch editor: {}",
            self.launch_editor
        );
        Ok(())
    }
}
