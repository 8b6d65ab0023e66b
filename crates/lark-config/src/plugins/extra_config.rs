//! Extracted runtime configuration: the `VITE_GLOB_` environment is
//! serialized into a separate emitted asset so deployments can edit runtime
//! settings without rebuilding, referenced from the page with a
//! content-hashed query string for cache busting.

use std::borrow::Cow;
use std::sync::Mutex;

use async_trait::async_trait;
use indexmap::IndexMap;

use lark_util::{content_hash, read_package_json};

use crate::builder::BuilderConfig;
use crate::context::BuildContext;
use crate::env::{GLOB_ENV_PREFIX, config_files, load_env};
use crate::error::{ConfigError, Result};
use crate::plugin::{Bundle, Plugin, SharedPlugin, shared};

/// Fixed name of the emitted runtime-config asset.
pub const GLOB_CONFIG_FILE_NAME: &str = "_app.config.js";

/// Window property the runtime config is assigned to.
pub const APP_CONF_VARIABLE: &str = "_LARK_APP_CONF_";

const HASH_LENGTH: usize = 8;

/// Emits `_app.config.js` and wires it into the entry page.
#[derive(Debug)]
pub struct ExtraAppConfigPlugin {
    source: String,
    hash: String,
    version: String,
    public_path: Mutex<String>,
}

impl ExtraAppConfigPlugin {
    /// Async factory for the build-only table entry: reads the package
    /// version and the glob-prefixed environment up front.
    pub async fn load(ctx: &BuildContext) -> Result<SharedPlugin> {
        let package = read_package_json(&ctx.root)?;
        let env = load_env(
            &ctx.root,
            GLOB_ENV_PREFIX,
            &config_files(ctx.script.as_deref()),
        );
        Ok(shared(Self::new(&package.version, &env)?))
    }

    pub fn new(version: &str, env: &IndexMap<String, String>) -> Result<Self> {
        let source = config_source(env)?;
        Ok(Self {
            hash: content_hash(&source, HASH_LENGTH),
            source,
            version: version.to_string(),
            public_path: Mutex::new("/".to_string()),
        })
    }

    /// `v=<version>-<hash>` cache-busting query for the script reference.
    pub fn version_query(&self) -> String {
        format!("v={}-{}", self.version, self.hash)
    }
}

#[async_trait]
impl Plugin for ExtraAppConfigPlugin {
    fn name(&self) -> Cow<'static, str> {
        "lark:extra-app-config".into()
    }

    async fn config_resolved(&self, config: &BuilderConfig) -> Result<()> {
        *self.public_path.lock().unwrap() = ensure_trailing_slash(&config.base);
        Ok(())
    }

    async fn generate_bundle(&self, bundle: &mut Bundle) -> Result<()> {
        // Best-effort side feature: a failed emission must not abort the build.
        match bundle.emit_asset(GLOB_CONFIG_FILE_NAME, self.source.as_str()) {
            Ok(()) => tracing::info!("runtime config asset built"),
            Err(err) => tracing::error!("failed to emit runtime config asset: {err}"),
        }
        Ok(())
    }

    async fn transform_index_html(&self, html: String) -> Result<String> {
        let public_path = self.public_path.lock().unwrap().clone();
        let src = format!(
            "{public_path}{GLOB_CONFIG_FILE_NAME}?{}",
            self.version_query()
        );
        Ok(inject_script(&html, &src))
    }
}

/// Serialize the environment into a frozen, non-configurable window
/// assignment so runtime code cannot silently mutate deploy settings.
fn config_source(env: &IndexMap<String, String>) -> Result<String> {
    let json =
        serde_json::to_string(env).map_err(|err| ConfigError::InvalidValue(err.to_string()))?;
    let variable = format!("window.{APP_CONF_VARIABLE}");
    Ok(format!(
        "{variable}={json};Object.freeze({variable});\
         Object.defineProperty(window,\"{APP_CONF_VARIABLE}\",{{configurable:false,writable:false}});"
    ))
}

fn ensure_trailing_slash(path: &str) -> String {
    if path.ends_with('/') {
        path.to_string()
    } else {
        format!("{path}/")
    }
}

fn inject_script(html: &str, src: &str) -> String {
    let tag = format!("<script src=\"{src}\"></script>");
    match html.rfind("</body>") {
        Some(at) => format!("{}{tag}\n{}", &html[..at], &html[at..]),
        None => format!("{html}\n{tag}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::indexmap;

    fn sample_env() -> IndexMap<String, String> {
        indexmap! {
            "VITE_GLOB_API_URL".to_string() => "/api".to_string(),
            "VITE_GLOB_APP_TITLE".to_string() => "Lark Admin".to_string(),
        }
    }

    #[test]
    fn source_assigns_and_freezes_window_config() {
        let source = config_source(&sample_env()).unwrap();
        assert!(source.starts_with("window._LARK_APP_CONF_={"));
        assert!(source.contains("\"VITE_GLOB_API_URL\":\"/api\""));
        assert!(source.contains("Object.freeze(window._LARK_APP_CONF_)"));
        assert!(source.contains("configurable:false"));
        assert!(source.contains("writable:false"));
    }

    #[tokio::test]
    async fn emits_asset_and_injects_hashed_script() {
        let plugin = ExtraAppConfigPlugin::new("1.4.0", &sample_env()).unwrap();
        let query = plugin.version_query();
        assert!(query.starts_with("v=1.4.0-"));
        assert_eq!(query.len(), "v=1.4.0-".len() + HASH_LENGTH);

        let config = BuilderConfig {
            base: "/admin".to_string(),
            ..Default::default()
        };
        plugin.config_resolved(&config).await.unwrap();

        let mut bundle = Bundle::new();
        plugin.generate_bundle(&mut bundle).await.unwrap();
        assert!(bundle.contains(GLOB_CONFIG_FILE_NAME));

        let html = plugin
            .transform_index_html("<html><body></body></html>".to_string())
            .await
            .unwrap();
        let expected = format!("/admin/{GLOB_CONFIG_FILE_NAME}?{query}");
        assert!(html.contains(&expected));
        // Script lands before the closing body tag.
        assert!(html.find(&expected).unwrap() < html.find("</body>").unwrap());
    }

    #[tokio::test]
    async fn duplicate_emission_is_logged_not_fatal() {
        let plugin = ExtraAppConfigPlugin::new("1.0.0", &sample_env()).unwrap();
        let mut bundle = Bundle::new();
        bundle.emit_asset(GLOB_CONFIG_FILE_NAME, "window.X={}").unwrap();

        // The slot is taken; emission fails internally but the hook succeeds.
        plugin.generate_bundle(&mut bundle).await.unwrap();
        assert_eq!(bundle.len(), 1);
    }

    #[test]
    fn identical_env_hashes_identically() {
        let a = ExtraAppConfigPlugin::new("1.0.0", &sample_env()).unwrap();
        let b = ExtraAppConfigPlugin::new("1.0.0", &sample_env()).unwrap();
        assert_eq!(a.version_query(), b.version_query());
    }
}
