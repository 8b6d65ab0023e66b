//! Option bags gating the conditional plugin tables.
//!
//! Three layers feed these records, lowest precedence first: the defaults
//! below, the environment-derived values ([`EnvOptions`] overlay), and the
//! caller-supplied patch structs. Each configuration assembly constructs a
//! fresh bag; nothing persists across builds.

use indexmap::IndexMap;

use crate::env::{CompressType, DEFAULT_APP_TITLE, EnvOptions};
use crate::plugins::pwa::WebManifest;

/// Options shared by every project kind.
#[derive(Debug, Clone)]
pub struct CommonOptions {
    /// True when the bundler runs a production build rather than the dev server.
    pub build: bool,
    pub mode: String,
    pub build_info: bool,
    /// Key/value hints printed alongside the dev-server URLs.
    pub build_info_hints: IndexMap<String, String>,
    pub auto_import: bool,
    pub devtools: bool,
    pub visualizer: bool,
}

impl Default for CommonOptions {
    fn default() -> Self {
        Self {
            build: false,
            mode: "production".to_string(),
            build_info: true,
            build_info_hints: IndexMap::new(),
            auto_import: true,
            devtools: true,
            visualizer: false,
        }
    }
}

/// Options for application projects (an entry HTML page is produced).
#[derive(Debug, Clone)]
pub struct ApplicationOptions {
    pub common: CommonOptions,
    pub app_title: String,
    pub html: bool,
    pub i18n: bool,
    pub inject_app_loading: bool,
    /// Recognized from the environment but currently gates no table entry.
    pub nitro_mock: bool,
    pub pwa: bool,
    /// Manifest override; a default derived from `app_title` is used when unset.
    pub pwa_manifest: Option<WebManifest>,
    pub components: bool,
    pub compress: bool,
    pub compress_types: Vec<CompressType>,
    pub extra_app_config: bool,
    pub unocss: bool,
}

impl Default for ApplicationOptions {
    fn default() -> Self {
        Self {
            common: CommonOptions::default(),
            app_title: DEFAULT_APP_TITLE.to_string(),
            html: true,
            i18n: false,
            inject_app_loading: true,
            nitro_mock: false,
            pwa: true,
            pwa_manifest: None,
            components: true,
            compress: true,
            compress_types: vec![CompressType::Gzip],
            extra_app_config: true,
            unocss: true,
        }
    }
}

impl ApplicationOptions {
    /// Write the environment-derived values over the current fields.
    ///
    /// The overlay is unconditional: whatever the normalizer produced wins
    /// over the defaults, and a later user patch wins over both.
    pub fn overlay_env(&mut self, env: &EnvOptions) {
        self.app_title = env.app_title.clone();
        self.compress = env.compress;
        self.compress_types = env.compress_types.clone();
        self.inject_app_loading = env.inject_app_loading;
        self.nitro_mock = env.nitro_mock;
        self.pwa = env.pwa;
        self.common.devtools = env.devtools;
        self.common.visualizer = env.visualizer;
    }

    pub fn apply(&mut self, patch: &ApplicationPatch) {
        let ApplicationPatch {
            app_title,
            build_info,
            build_info_hints,
            auto_import,
            devtools,
            visualizer,
            html,
            i18n,
            inject_app_loading,
            nitro_mock,
            pwa,
            pwa_manifest,
            components,
            compress,
            compress_types,
            extra_app_config,
            unocss,
        } = patch;

        set(&mut self.app_title, app_title);
        set(&mut self.common.build_info, build_info);
        set(&mut self.common.build_info_hints, build_info_hints);
        set(&mut self.common.auto_import, auto_import);
        set(&mut self.common.devtools, devtools);
        set(&mut self.common.visualizer, visualizer);
        set(&mut self.html, html);
        set(&mut self.i18n, i18n);
        set(&mut self.inject_app_loading, inject_app_loading);
        set(&mut self.nitro_mock, nitro_mock);
        set(&mut self.pwa, pwa);
        set(&mut self.compress, compress);
        set(&mut self.compress_types, compress_types);
        set(&mut self.components, components);
        set(&mut self.extra_app_config, extra_app_config);
        set(&mut self.unocss, unocss);
        if pwa_manifest.is_some() {
            self.pwa_manifest = pwa_manifest.clone();
        }
    }
}

/// Options for library projects (an importable module is produced).
#[derive(Debug, Clone)]
pub struct LibraryOptions {
    pub common: CommonOptions,
    pub dts: bool,
}

impl Default for LibraryOptions {
    fn default() -> Self {
        Self {
            common: CommonOptions::default(),
            dts: false,
        }
    }
}

impl LibraryOptions {
    pub fn apply(&mut self, patch: &LibraryPatch) {
        let LibraryPatch {
            build_info,
            auto_import,
            devtools,
            visualizer,
            dts,
        } = patch;

        set(&mut self.common.build_info, build_info);
        set(&mut self.common.auto_import, auto_import);
        set(&mut self.common.devtools, devtools);
        set(&mut self.common.visualizer, visualizer);
        set(&mut self.dts, dts);
    }
}

fn set<T: Clone>(slot: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *slot = value.clone();
    }
}

/// Caller-supplied per-field overrides for application options.
#[derive(Debug, Clone, Default)]
pub struct ApplicationPatch {
    pub app_title: Option<String>,
    pub build_info: Option<bool>,
    pub build_info_hints: Option<IndexMap<String, String>>,
    pub auto_import: Option<bool>,
    pub devtools: Option<bool>,
    pub visualizer: Option<bool>,
    pub html: Option<bool>,
    pub i18n: Option<bool>,
    pub inject_app_loading: Option<bool>,
    pub nitro_mock: Option<bool>,
    pub pwa: Option<bool>,
    pub pwa_manifest: Option<WebManifest>,
    pub components: Option<bool>,
    pub compress: Option<bool>,
    pub compress_types: Option<Vec<CompressType>>,
    pub extra_app_config: Option<bool>,
    pub unocss: Option<bool>,
}

/// Caller-supplied per-field overrides for library options.
#[derive(Debug, Clone, Default)]
pub struct LibraryPatch {
    pub build_info: Option<bool>,
    pub auto_import: Option<bool>,
    pub devtools: Option<bool>,
    pub visualizer: Option<bool>,
    pub dts: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    #[test]
    fn env_overlay_overwrites_defaults() {
        let mut options = ApplicationOptions::default();
        assert!(options.inject_app_loading);

        // Empty environment: every boolean key normalizes to false.
        let env = EnvOptions::from_env(&IndexMap::new());
        options.overlay_env(&env);
        assert!(!options.inject_app_loading);
        assert!(!options.pwa);
        assert!(!options.common.devtools);
        // The compress list defaults to gzip, so compression stays on.
        assert!(options.compress);
        assert_eq!(options.compress_types, vec![CompressType::Gzip]);
    }

    #[test]
    fn patch_wins_over_env_overlay() {
        let mut options = ApplicationOptions::default();
        let env = EnvOptions::from_env(&IndexMap::new());
        options.overlay_env(&env);

        let patch = ApplicationPatch {
            pwa: Some(true),
            compress: Some(false),
            ..ApplicationPatch::default()
        };
        options.apply(&patch);

        assert!(options.pwa);
        assert!(!options.compress);
        // Untouched fields keep the overlay's values.
        assert!(!options.common.devtools);
    }

    #[test]
    fn library_patch_applies_dts() {
        let mut options = LibraryOptions::default();
        assert!(!options.dts);
        options.apply(&LibraryPatch {
            dts: Some(true),
            ..LibraryPatch::default()
        });
        assert!(options.dts);
    }
}
