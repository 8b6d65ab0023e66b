//! Configuration assembly entry points.
//!
//! `define_application_config` / `define_library_config` / `define_config`
//! return a [`ConfigFactory`] the external bundler calls with the current
//! [`BuildContext`]. Each `resolve` call is a one-shot pipeline: detect kind,
//! gather options, resolve plugins, deep-merge the layered configuration,
//! return. Nothing persists between calls.

mod application;
mod common;
mod library;

pub use common::common_config;
pub use library::{external_packages, is_external_import};

use std::path::Path;

use futures::future::BoxFuture;
use serde_json::Value;

use crate::builder::BuilderConfig;
use crate::context::BuildContext;
use crate::error::{ConfigError, Result};
use crate::options::{ApplicationPatch, LibraryPatch};
use crate::plugin::SharedPlugin;

/// Project classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    /// Produces an entry HTML page.
    Application,
    /// Produces an importable module.
    Library,
}

/// Marker file distinguishing an application from a library.
const KIND_MARKER: &str = "index.html";

/// Auto-detect the project kind from the working directory.
pub fn detect_kind(root: &Path) -> ProjectKind {
    if root.join(KIND_MARKER).is_file() {
        ProjectKind::Application
    } else {
        ProjectKind::Library
    }
}

/// Caller-supplied overrides gathered per invocation.
///
/// Kind-specific option patches ride next to raw builder overrides; the
/// overrides value deep-merges over the assembled configuration last.
#[derive(Debug, Clone)]
pub struct UserConfig {
    pub application: Option<ApplicationPatch>,
    pub library: Option<LibraryPatch>,
    /// Raw builder overrides, highest-precedence merge layer.
    pub builder: Value,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            application: None,
            library: None,
            builder: Value::Object(serde_json::Map::new()),
        }
    }
}

impl UserConfig {
    /// Wrap a fixed configuration as a provider.
    pub fn into_provider(self) -> UserConfigProvider {
        Box::new(move |_ctx| {
            let config = self.clone();
            Box::pin(async move { Ok(config) })
        })
    }
}

/// Callback producing user overrides from the build context; may suspend.
pub type UserConfigProvider =
    Box<dyn Fn(&BuildContext) -> BoxFuture<'static, Result<UserConfig>> + Send + Sync>;

/// Terminal product of configuration assembly, consumed once by the bundler.
pub struct ResolvedConfig {
    pub builder: BuilderConfig,
    pub plugins: Vec<SharedPlugin>,
}

impl ResolvedConfig {
    /// Plugin names in execution order, mainly for diagnostics.
    pub fn plugin_names(&self) -> Vec<String> {
        self.plugins
            .iter()
            .map(|plugin| plugin.name().into_owned())
            .collect()
    }
}

impl std::fmt::Debug for ResolvedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedConfig")
            .field("builder", &self.builder)
            .field("plugins", &self.plugin_names())
            .finish()
    }
}

enum KindSelector {
    Fixed(ProjectKind),
    Auto,
}

/// Deferred configuration assembly, invoked by the bundler per build.
pub struct ConfigFactory {
    selector: KindSelector,
    provider: Option<UserConfigProvider>,
}

impl ConfigFactory {
    /// Run the assembly pipeline for `ctx`.
    ///
    /// Auto kind is decided here, from the context root, so a factory defined
    /// once serves whichever project directory the bundler runs in.
    pub async fn resolve(&self, ctx: &BuildContext) -> Result<ResolvedConfig> {
        let kind = match self.selector {
            KindSelector::Fixed(kind) => kind,
            KindSelector::Auto => detect_kind(&ctx.root),
        };
        match kind {
            ProjectKind::Application => {
                application::assemble_application(ctx, self.provider.as_ref()).await
            }
            ProjectKind::Library => library::assemble_library(ctx, self.provider.as_ref()).await,
        }
    }

    async fn user_config(
        ctx: &BuildContext,
        provider: Option<&UserConfigProvider>,
    ) -> Result<UserConfig> {
        match provider {
            Some(provider) => provider(ctx).await,
            None => Ok(UserConfig::default()),
        }
    }
}

/// Factory fixed to application assembly.
pub fn define_application_config(provider: Option<UserConfigProvider>) -> ConfigFactory {
    ConfigFactory {
        selector: KindSelector::Fixed(ProjectKind::Application),
        provider,
    }
}

/// Factory fixed to library assembly.
pub fn define_library_config(provider: Option<UserConfigProvider>) -> ConfigFactory {
    ConfigFactory {
        selector: KindSelector::Fixed(ProjectKind::Library),
        provider,
    }
}

/// Factory for an explicit or auto-detected kind.
///
/// Any kind string other than `application`, `library` or `auto` aborts
/// assembly with [`ConfigError::UnsupportedKind`].
pub fn define_config(provider: Option<UserConfigProvider>, kind: &str) -> Result<ConfigFactory> {
    match kind {
        "application" => Ok(define_application_config(provider)),
        "library" => Ok(define_library_config(provider)),
        "auto" => Ok(ConfigFactory {
            selector: KindSelector::Auto,
            provider,
        }),
        other => Err(ConfigError::UnsupportedKind(other.to_string())),
    }
}
