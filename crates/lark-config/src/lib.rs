//! Layered builder-configuration factory for lark web projects.
//!
//! The crate assembles what the external bundler consumes: a deep-merged
//! [`BuilderConfig`] plus an ordered plugin list resolved from conditional
//! plugin tables. Entry points mirror the project kinds:
//!
//! ```no_run
//! use lark_config::{BuildContext, Command, define_config};
//!
//! # async fn demo() -> lark_config::Result<()> {
//! let factory = define_config(None, "auto")?;
//! let ctx = BuildContext::from_cwd(Command::Build, "production")?;
//! let resolved = factory.resolve(&ctx).await?;
//! println!("{} plugins resolved", resolved.plugins.len());
//! # Ok(())
//! # }
//! ```
//!
//! Environment files (`.env`, `.env.<mode>`) feed typed options through
//! [`EnvOptions`]; user overrides arrive through a [`UserConfig`] provider
//! and win on a per-field basis. Plugin table order is declaration order;
//! factories of disabled entries are never invoked.

pub mod builder;
pub mod config;
pub mod context;
pub mod env;
pub mod error;
#[cfg(feature = "logging")]
pub mod logging;
pub mod merge;
pub mod options;
pub mod plugin;
pub mod plugins;

pub use builder::{
    BuildSection, BuilderConfig, EsTarget, LibOptions, OutputFormat, OutputNaming, ServerSection,
    TransformSection,
};
pub use config::{
    ConfigFactory, ProjectKind, ResolvedConfig, UserConfig, UserConfigProvider, common_config,
    define_application_config, define_config, define_library_config, detect_kind,
    external_packages, is_external_import,
};
pub use context::{BuildContext, Command};
pub use env::{CompressType, ENV_PREFIX, EnvOptions, GLOB_ENV_PREFIX, config_files, load_env};
pub use error::{ConfigError, Result};
pub use merge::{merge_config, merge_config_value, merge_values};
pub use options::{
    ApplicationOptions, ApplicationPatch, CommonOptions, LibraryOptions, LibraryPatch,
};
pub use plugin::{AssetSource, Bundle, Output, OutputAsset, OutputChunk, Plugin, SharedPlugin};
pub use plugins::{
    ConditionPlugin, PluginFactory, application_plugins, common_plugins, library_plugins,
    resolve_condition_plugins,
};
