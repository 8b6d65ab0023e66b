//! License banner prepended to entry chunks after bundle generation.

use std::borrow::Cow;
use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;

use lark_util::{PackageJson, format_date, read_package_json};

use crate::error::Result;
use crate::plugin::{Bundle, Plugin, SharedPlugin, shared};

/// Prepends a fixed-format comment block to every entry-point chunk.
///
/// Exported for callers that want the banner; the default plugin tables do
/// not gate an entry on it.
#[derive(Debug)]
pub struct LicensePlugin {
    banner: String,
}

impl LicensePlugin {
    pub async fn load(root: &Path) -> Result<SharedPlugin> {
        let package = read_package_json(root)?;
        Ok(shared(Self::new(&package)))
    }

    pub fn new(package: &PackageJson) -> Self {
        let date = format_date(Utc::now());
        let banner = format!(
            "/*!\n\
             \x20* {}\n\
             \x20* Version: {}\n\
             \x20* Author: {}\n\
             \x20* License: {}\n\
             \x20* Description: {}\n\
             \x20* Date Created: {date}\n\
             \x20* Homepage: {}\n\
             \x20*/",
            package.name,
            package.version,
            package.author,
            package.license,
            package.description,
            package.homepage,
        );
        Self { banner }
    }

    pub fn banner(&self) -> &str {
        &self.banner
    }
}

#[async_trait]
impl Plugin for LicensePlugin {
    fn name(&self) -> Cow<'static, str> {
        "lark:license".into()
    }

    async fn generate_bundle(&self, bundle: &mut Bundle) -> Result<()> {
        for chunk in bundle.chunks_mut() {
            if chunk.is_entry {
                chunk.code = format!("{}\n{}", self.banner, chunk.code);
            }
        }
        Ok(())
    }
}
