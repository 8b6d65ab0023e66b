//! Library assembly: external-dependency exclusion from the package
//! manifest and the single-ES-module output contract.

use lark_util::{PackageJson, read_package_json};

use crate::builder::{BuildSection, BuilderConfig, LibOptions};
use crate::context::BuildContext;
use crate::error::Result;
use crate::merge::{merge_config, merge_config_value};
use crate::options::LibraryOptions;
use crate::plugins::{library_plugins, resolve_condition_plugins};

use super::common::common_config;
use super::{ConfigFactory, ResolvedConfig, UserConfigProvider};

pub(super) async fn assemble_library(
    ctx: &BuildContext,
    provider: Option<&UserConfigProvider>,
) -> Result<ResolvedConfig> {
    let user = ConfigFactory::user_config(ctx, provider).await?;

    let mut options = LibraryOptions::default();
    options.common.build = ctx.is_build();
    options.common.mode = ctx.mode.clone();
    if let Some(patch) = &user.library {
        options.apply(patch);
    }

    let plugins = resolve_condition_plugins(library_plugins(&options, ctx)).await?;

    let package = read_package_json(&ctx.root)?;
    let library = library_config(&package);
    let merged = merge_config(&common_config(), &library)?;
    let builder = merge_config_value(&merged, &user.builder)?;

    Ok(ResolvedConfig { builder, plugins })
}

fn library_config(package: &PackageJson) -> BuilderConfig {
    BuilderConfig {
        build: BuildSection {
            lib: Some(LibOptions::default()),
            external: external_packages(package),
            ..BuildSection::default()
        },
        ..BuilderConfig::default()
    }
}

/// Packages the consuming project is expected to supply itself: everything
/// the library declares as a runtime or peer dependency.
pub fn external_packages(package: &PackageJson) -> Vec<String> {
    package
        .dependencies
        .keys()
        .chain(package.peer_dependencies.keys())
        .cloned()
        .collect()
}

/// Whether `id` must stay external: an exact package-name match or a
/// sub-path of one (`vue/dist/runtime` for `vue`). A shared name prefix
/// alone (`vuex` for `vue`) does not qualify.
pub fn is_external_import(id: &str, packages: &[String]) -> bool {
    packages
        .iter()
        .any(|package| id == package || id.starts_with(&format!("{package}/")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::indexmap;

    fn sample_package() -> PackageJson {
        PackageJson {
            dependencies: indexmap! {
                "vue".to_string() => "^3.4.0".to_string(),
            },
            peer_dependencies: indexmap! {
                "pinia".to_string() => "^2.1.0".to_string(),
            },
            ..Default::default()
        }
    }

    #[test]
    fn externals_combine_runtime_and_peer_dependencies() {
        let external = external_packages(&sample_package());
        assert_eq!(external, ["vue", "pinia"]);
    }

    #[test]
    fn subpath_imports_are_external() {
        let external = external_packages(&sample_package());
        assert!(is_external_import("vue", &external));
        assert!(is_external_import("vue/dist/runtime", &external));
        assert!(is_external_import("pinia/dist/pinia.mjs", &external));
    }

    #[test]
    fn prefix_sharing_package_names_are_not_external() {
        let external = external_packages(&sample_package());
        assert!(!is_external_import("vuex", &external));
        assert!(!is_external_import("vue-router", &external));
    }

    #[test]
    fn library_layer_targets_single_es_module() {
        let config = library_config(&sample_package());
        let lib = config.build.lib.as_ref().unwrap();
        assert_eq!(lib.file_name, "index.mjs");
        assert_eq!(lib.formats.len(), 1);
    }
}
