//! End-to-end configuration assembly: kind detection, option layering,
//! plugin resolution and the deep-merge precedence chain.

use std::fs;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;

use lark_config::{
    ApplicationPatch, BuildContext, Command, ConfigError, EsTarget, UserConfig,
    define_application_config, define_config, define_library_config, is_external_import,
};

fn write_package(root: &Path) {
    fs::write(
        root.join("package.json"),
        r#"{
            "name": "@lark/demo",
            "version": "1.0.0",
            "dependencies": { "vue": "^3.4.0" },
            "peerDependencies": { "pinia": "^2.1.0" }
        }"#,
    )
    .unwrap();
}

fn application_root() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_package(dir.path());
    fs::write(dir.path().join("index.html"), "<html><body></body></html>").unwrap();
    dir
}

#[tokio::test]
async fn application_build_resolves_expected_plugin_order() {
    let dir = application_root();
    let ctx = BuildContext::new(Command::Build, "production", dir.path());

    let factory = define_application_config(None);
    let resolved = factory.resolve(&ctx).await.unwrap();

    // Empty environment: boolean toggles off, compression on via the gzip
    // default. Order is table declaration order.
    assert_eq!(
        resolved.plugin_names(),
        [
            "lark:framework",
            "lark:framework-jsx",
            "lark:build-info",
            "lark:auto-import",
            "lark:components",
            "lark:compress-gz",
            "lark:html",
            "lark:extra-app-config",
            "lark:unocss",
        ]
    );
}

#[tokio::test]
async fn serve_skips_build_only_entries() {
    let dir = application_root();
    fs::write(dir.path().join(".env"), "VITE_DEVTOOLS=true\n").unwrap();
    let ctx = BuildContext::new(Command::Serve, "development", dir.path());

    let resolved = define_application_config(None).resolve(&ctx).await.unwrap();
    let names = resolved.plugin_names();

    assert!(names.contains(&"lark:devtools".to_string()));
    assert!(!names.iter().any(|name| name.starts_with("lark:compress")));
    assert!(!names.contains(&"lark:extra-app-config".to_string()));
}

#[tokio::test]
async fn environment_toggles_gate_table_entries() {
    let dir = application_root();
    fs::write(
        dir.path().join(".env"),
        "VITE_PWA=true\nVITE_INJECT_APP_LOADING=true\nVITE_COMPRESS=brotli,gzip\nVITE_VISUALIZER=true\n",
    )
    .unwrap();
    let ctx = BuildContext::new(Command::Build, "production", dir.path());

    let resolved = define_application_config(None).resolve(&ctx).await.unwrap();
    let names = resolved.plugin_names();

    assert!(names.contains(&"lark:visualizer".to_string()));
    assert!(names.contains(&"lark:app-loading".to_string()));
    assert!(names.contains(&"lark:pwa".to_string()));
    // Both algorithms selected, brotli first per the factory.
    let brotli = names.iter().position(|name| name == "lark:compress-br");
    let gzip = names.iter().position(|name| name == "lark:compress-gz");
    assert!(brotli.unwrap() < gzip.unwrap());
}

#[tokio::test]
async fn application_config_carries_the_naming_contract() {
    let dir = application_root();
    fs::write(dir.path().join(".env"), "VITE_PORT=30000\nVITE_BASE=/console/\n").unwrap();
    let ctx = BuildContext::new(Command::Build, "production", dir.path());

    let resolved = define_application_config(None).resolve(&ctx).await.unwrap();
    let build = &resolved.builder.build;

    assert_eq!(resolved.builder.base, "/console/");
    assert_eq!(
        build.output.entry_file_names.as_deref(),
        Some("jse/index-[name]-[hash].js")
    );
    assert_eq!(build.target, Some(EsTarget::ES2020));
    assert!(!build.sourcemap);
    assert_eq!(resolved.builder.server.port, Some(30000));
    assert_eq!(resolved.builder.transform.drop, ["debugger"]);
}

#[tokio::test]
async fn user_overrides_take_highest_precedence() {
    let dir = application_root();
    let ctx = BuildContext::new(Command::Build, "production", dir.path());

    let user = UserConfig {
        builder: json!({ "build": { "target": "es2015" } }),
        ..UserConfig::default()
    };
    let factory = define_application_config(Some(user.into_provider()));
    let resolved = factory.resolve(&ctx).await.unwrap();

    // common(sourcemap=false) < application(target=es2020) < user(target=es2015)
    assert_eq!(resolved.builder.build.target, Some(EsTarget::ES2015));
    assert!(!resolved.builder.build.sourcemap);
}

#[tokio::test]
async fn user_patch_wins_over_environment_options() {
    let dir = application_root();
    fs::write(dir.path().join(".env"), "VITE_PWA=true\n").unwrap();
    let ctx = BuildContext::new(Command::Build, "production", dir.path());

    let user = UserConfig {
        application: Some(ApplicationPatch {
            pwa: Some(false),
            html: Some(false),
            ..ApplicationPatch::default()
        }),
        ..UserConfig::default()
    };
    let resolved = define_application_config(Some(user.into_provider()))
        .resolve(&ctx)
        .await
        .unwrap();
    let names = resolved.plugin_names();

    assert!(!names.contains(&"lark:pwa".to_string()));
    assert!(!names.contains(&"lark:html".to_string()));
}

#[tokio::test]
async fn library_assembly_excludes_declared_dependencies() {
    let dir = TempDir::new().unwrap();
    write_package(dir.path());
    let ctx = BuildContext::new(Command::Build, "production", dir.path());

    let resolved = define_library_config(None).resolve(&ctx).await.unwrap();
    let build = &resolved.builder.build;

    let external = &build.external;
    assert!(is_external_import("vue", external));
    assert!(is_external_import("vue/dist/runtime", external));
    assert!(is_external_import("pinia", external));
    assert!(!is_external_import("vuex", external));

    let lib = build.lib.as_ref().unwrap();
    assert_eq!(lib.file_name, "index.mjs");
}

#[tokio::test]
async fn library_assembly_requires_package_metadata() {
    let dir = TempDir::new().unwrap();
    let ctx = BuildContext::new(Command::Build, "production", dir.path());

    let result = define_library_config(None).resolve(&ctx).await;
    assert!(matches!(result, Err(ConfigError::Util(_))));
}

#[tokio::test]
async fn auto_kind_follows_the_html_marker() {
    let app_dir = application_root();
    let app_ctx = BuildContext::new(Command::Build, "production", app_dir.path());
    let resolved = define_config(None, "auto")
        .unwrap()
        .resolve(&app_ctx)
        .await
        .unwrap();
    assert!(resolved.builder.build.lib.is_none());
    assert!(resolved.plugin_names().contains(&"lark:html".to_string()));

    let lib_dir = TempDir::new().unwrap();
    write_package(lib_dir.path());
    let lib_ctx = BuildContext::new(Command::Build, "production", lib_dir.path());
    let resolved = define_config(None, "auto")
        .unwrap()
        .resolve(&lib_ctx)
        .await
        .unwrap();
    assert!(resolved.builder.build.lib.is_some());
}

#[test]
fn unsupported_kind_aborts_assembly() {
    let result = define_config(None, "service");
    assert!(matches!(
        result,
        Err(ConfigError::UnsupportedKind(kind)) if kind == "service"
    ));
}
