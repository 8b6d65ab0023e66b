//! Internationalization integration: verifies the locale directory and
//! reports how many message files the compiler will pick up.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use lark_util::recursive_directory;

use crate::error::Result;
use crate::plugin::Plugin;

#[derive(Debug)]
pub struct I18nPlugin {
    include: PathBuf,
}

impl I18nPlugin {
    pub fn new(root: &Path) -> Self {
        Self {
            include: root.join("src/locales"),
        }
    }

    pub fn include(&self) -> &Path {
        &self.include
    }
}

#[async_trait]
impl Plugin for I18nPlugin {
    fn name(&self) -> Cow<'static, str> {
        "lark:i18n".into()
    }

    async fn build_start(&self) -> Result<()> {
        if !self.include.is_dir() {
            tracing::warn!("locale directory {} not present", self.include.display());
            return Ok(());
        }
        let count = recursive_directory(&self.include)?.len();
        tracing::debug!("{count} locale files under {}", self.include.display());
        Ok(())
    }
}
