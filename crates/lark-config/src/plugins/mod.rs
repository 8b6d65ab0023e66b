//! Conditional plugin tables and their resolver.
//!
//! Each table is an ordered list of `(condition, lazy factory)` entries.
//! Declaration order is the only ordering mechanism: the resolved plugin list
//! keeps table order, and the bundler runs hooks in list order. Factories of
//! false entries are never invoked, so disabled features pay no construction
//! cost and trigger no side effects.

pub mod app_loading;
pub mod auto_import;
pub mod build_info;
pub mod components;
pub mod compress;
pub mod devtools;
pub mod dts;
pub mod extra_config;
pub mod framework;
pub mod html;
pub mod i18n;
pub mod license;
pub mod pwa;
pub mod unocss;
pub mod visualizer;

use futures::future::BoxFuture;

use crate::context::BuildContext;
use crate::env::CompressType;
use crate::error::Result;
use crate::options::{ApplicationOptions, CommonOptions, LibraryOptions};
use crate::plugin::{SharedPlugin, shared};

use app_loading::AppLoadingPlugin;
use auto_import::AutoImportPlugin;
use build_info::BuildInfoPlugin;
use components::ComponentsPlugin;
use compress::CompressPlugin;
use devtools::DevtoolsPlugin;
use dts::DtsPlugin;
use extra_config::ExtraAppConfigPlugin;
use framework::{FrameworkJsxPlugin, FrameworkPlugin};
use html::HtmlPlugin;
use i18n::I18nPlugin;
use pwa::{PwaPlugin, WebManifest};
use unocss::UnocssPlugin;
use visualizer::VisualizerPlugin;

/// Lazy constructor for a table entry's plugin instances.
pub type PluginFactory = Box<dyn FnOnce() -> BoxFuture<'static, Result<Vec<SharedPlugin>>> + Send>;

/// One table entry: a gate plus the factory it guards.
pub struct ConditionPlugin {
    pub condition: bool,
    factory: PluginFactory,
}

impl ConditionPlugin {
    /// Entry with a synchronous, infallible factory.
    pub fn new<F>(condition: bool, factory: F) -> Self
    where
        F: FnOnce() -> Vec<SharedPlugin> + Send + 'static,
    {
        Self {
            condition,
            factory: Box::new(move || Box::pin(async move { Ok(factory()) })),
        }
    }

    /// Entry whose factory suspends (dynamic reads, package metadata).
    pub fn new_async<F, Fut>(condition: bool, factory: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Vec<SharedPlugin>>> + Send + 'static,
    {
        Self {
            condition,
            factory: Box::new(move || Box::pin(factory())),
        }
    }
}

/// Resolve a table into the ordered plugin list.
///
/// Entries are awaited strictly sequentially in declaration order; a false
/// condition skips the factory entirely. Factory output flattens one level,
/// so an entry may contribute zero or several plugins.
pub async fn resolve_condition_plugins(table: Vec<ConditionPlugin>) -> Result<Vec<SharedPlugin>> {
    let mut plugins = Vec::new();
    for entry in table {
        if entry.condition {
            plugins.extend((entry.factory)().await?);
        }
    }
    Ok(plugins)
}

/// Entries applicable regardless of project kind.
pub fn common_plugins(options: &CommonOptions, ctx: &BuildContext) -> Vec<ConditionPlugin> {
    let build = options.build;
    let root = ctx.root.clone();
    let hints = options.build_info_hints.clone();
    let visualizer_root = ctx.root.clone();

    vec![
        ConditionPlugin::new(true, || {
            vec![shared(FrameworkPlugin::new()), shared(FrameworkJsxPlugin)]
        }),
        ConditionPlugin::new(options.build_info, move || {
            vec![shared(BuildInfoPlugin::new("Lark", build).with_hints(hints))]
        }),
        ConditionPlugin::new(options.auto_import, move || {
            vec![shared(AutoImportPlugin::new(&root))]
        }),
        // Serve only.
        ConditionPlugin::new(!build && options.devtools, || {
            vec![shared(DevtoolsPlugin::new())]
        }),
        // Build only.
        ConditionPlugin::new(build && options.visualizer, move || {
            vec![shared(VisualizerPlugin::new(&visualizer_root))]
        }),
    ]
}

/// Common entries plus the application-specific extension table.
pub fn application_plugins(options: &ApplicationOptions, ctx: &BuildContext) -> Vec<ConditionPlugin> {
    let build = options.common.build;
    let mut table = common_plugins(&options.common, ctx);

    let i18n_root = ctx.root.clone();
    let loading_root = ctx.root.clone();
    let loading_title = options.app_title.clone();
    let manifest = options
        .pwa_manifest
        .clone()
        .unwrap_or_else(|| WebManifest::standard(&options.app_title, build));
    let components_root = ctx.root.clone();
    let compress_types = options.compress_types.clone();
    let extra_ctx = ctx.clone();

    table.extend([
        ConditionPlugin::new(options.i18n, move || vec![shared(I18nPlugin::new(&i18n_root))]),
        ConditionPlugin::new_async(options.inject_app_loading, move || async move {
            Ok(vec![AppLoadingPlugin::load(&loading_root, &loading_title).await?])
        }),
        ConditionPlugin::new(options.pwa, move || vec![shared(PwaPlugin::new(manifest))]),
        ConditionPlugin::new(options.components, move || {
            vec![shared(ComponentsPlugin::new(&components_root))]
        }),
        // One instance per selected algorithm, so this entry may contribute
        // zero, one or two plugins.
        ConditionPlugin::new(build && options.compress, move || {
            compress_plugins(&compress_types)
        }),
        ConditionPlugin::new(options.html, || vec![shared(HtmlPlugin::new(true))]),
        ConditionPlugin::new_async(build && options.extra_app_config, move || async move {
            Ok(vec![ExtraAppConfigPlugin::load(&extra_ctx).await?])
        }),
        ConditionPlugin::new(options.unocss, || vec![shared(UnocssPlugin::new())]),
    ]);
    table
}

/// Common entries plus the library-specific extension table.
pub fn library_plugins(options: &LibraryOptions, ctx: &BuildContext) -> Vec<ConditionPlugin> {
    let build = options.common.build;
    let mut table = common_plugins(&options.common, ctx);
    table.push(ConditionPlugin::new(build && options.dts, || {
        vec![shared(DtsPlugin::new())]
    }));
    table
}

fn compress_plugins(types: &[CompressType]) -> Vec<SharedPlugin> {
    let mut plugins = Vec::new();
    if types.contains(&CompressType::Brotli) {
        plugins.push(shared(CompressPlugin::new(CompressType::Brotli)));
    }
    if types.contains(&CompressType::Gzip) {
        plugins.push(shared(CompressPlugin::new(CompressType::Gzip)));
    }
    plugins
}
