//! Build progress reporter: welcome banner, dev-server hints, and a final
//! elapsed-time / output-size summary.

use std::borrow::Cow;
use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use lark_util::{format_duration, recursive_directory, total_size};

use crate::builder::BuilderConfig;
use crate::plugin::Plugin;

const UNITS: [&str; 9] = ["Bytes", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];

/// Human-readable byte size with 1024-based units.
///
/// Two decimals by default, trailing zeros trimmed (`1 KB`, not `1.00 KB`).
pub fn format_bytes(size: u64, fixed: usize) -> String {
    if size == 0 {
        return "0 Bytes".to_string();
    }
    let exponent = ((size as f64).ln() / 1024f64.ln()).floor() as usize;
    let exponent = exponent.min(UNITS.len() - 1);
    let value = size as f64 / 1024f64.powi(exponent as i32);
    let mut formatted = format!("{value:.fixed$}");
    if formatted.contains('.') {
        formatted = formatted.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    format!("{formatted} {}", UNITS[exponent])
}

#[derive(Debug, Default)]
struct BuildInfoState {
    start: Option<DateTime<Utc>>,
    out_dir: Option<PathBuf>,
}

/// Console reporter for the build lifecycle.
#[derive(Debug)]
pub struct BuildInfoPlugin {
    product_name: String,
    build: bool,
    /// Printed under the dev-server URLs when serving.
    hints: IndexMap<String, String>,
    state: Mutex<BuildInfoState>,
}

impl BuildInfoPlugin {
    pub fn new(product_name: impl Into<String>, build: bool) -> Self {
        Self {
            product_name: product_name.into(),
            build,
            hints: IndexMap::new(),
            state: Mutex::new(BuildInfoState::default()),
        }
    }

    pub fn with_hints(mut self, hints: IndexMap<String, String>) -> Self {
        self.hints = hints;
        self
    }
}

#[async_trait]
impl Plugin for BuildInfoPlugin {
    fn name(&self) -> Cow<'static, str> {
        "lark:build-info".into()
    }

    async fn config_resolved(&self, config: &BuilderConfig) -> crate::error::Result<()> {
        let mut state = self.state.lock().unwrap();
        state.out_dir = Some(config.build.out_dir.clone());
        Ok(())
    }

    async fn build_start(&self) -> crate::error::Result<()> {
        let action = if self.build { "bundling" } else { "compiling" };
        tracing::info!("welcome to [{}], {action} now", self.product_name);
        if self.build {
            self.state.lock().unwrap().start = Some(Utc::now());
        } else {
            for (key, value) in &self.hints {
                tracing::info!("{key}: {value}");
            }
        }
        Ok(())
    }

    async fn close_bundle(&self) -> crate::error::Result<()> {
        if !self.build {
            return Ok(());
        }
        let (start, out_dir) = {
            let state = self.state.lock().unwrap();
            (state.start, state.out_dir.clone())
        };
        let Some(out_dir) = out_dir else {
            return Ok(());
        };
        let files = recursive_directory(&out_dir)?;
        let size = format_bytes(total_size(&files), 2);
        let elapsed = start
            .map(|start| format_duration(Utc::now() - start))
            .unwrap_or_else(|| "0m 00s".to_string());
        tracing::info!("build completed in {elapsed}, output size {size}");
        Ok(())
    }
}
