//! Environment-file loading and option normalization.

use std::path::Path;
use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::context::BuildContext;

/// Key prefix for variables surfaced to the client build.
pub const ENV_PREFIX: &str = "VITE_";

/// Key prefix for variables extracted into the runtime config asset.
pub const GLOB_ENV_PREFIX: &str = "VITE_GLOB_";

/// Product title used when the environment supplies none.
pub const DEFAULT_APP_TITLE: &str = "Lark Admin";

const DEFAULT_PORT: u16 = 20010;

fn mode_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"--mode ([0-9a-z_]+)").expect("mode pattern"))
}

/// Candidate env-file names for the current invocation.
///
/// A `--mode <name>` token in the invoking script selects `.env.<name>`;
/// without one the production pair is used. `.env` itself is always
/// attempted first so mode files override it on conflict.
pub fn config_files(script: Option<&str>) -> Vec<String> {
    if let Some(script) = script {
        if let Some(captures) = mode_pattern().captures(script) {
            return vec![".env".to_string(), format!(".env.{}", &captures[1])];
        }
    }
    vec![".env".to_string(), ".env.production".to_string()]
}

/// Load `prefix`-keyed variables from the candidate files under `root`.
///
/// Files merge in listed order, later files overriding earlier keys. A
/// missing or unparsable file contributes nothing: it is logged and the
/// remaining candidates are still attempted. The result is empty when no
/// candidate exists; this never errors.
pub fn load_env(root: &Path, prefix: &str, files: &[String]) -> IndexMap<String, String> {
    let mut env = IndexMap::new();
    for file in files {
        let path = root.join(file);
        if !path.is_file() {
            tracing::debug!("env file {} not present", path.display());
            continue;
        }
        match read_env_file(&path) {
            Ok(parsed) => env.extend(parsed),
            Err(err) => tracing::warn!("skipping env file {}: {err}", path.display()),
        }
    }
    env.retain(|key, _| key.starts_with(prefix));
    env
}

fn read_env_file(path: &Path) -> dotenvy::Result<Vec<(String, String)>> {
    dotenvy::from_path_iter(path)?.collect()
}

/// Compression algorithms recognized by the compress plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressType {
    Brotli,
    Gzip,
}

impl CompressType {
    fn parse(token: &str) -> Option<Self> {
        match token {
            "brotli" => Some(Self::Brotli),
            "gzip" => Some(Self::Gzip),
            _ => None,
        }
    }

    /// Parse a comma-separated algorithm list, dropping unknown tokens.
    /// An absent value defaults to gzip alone.
    pub fn parse_list(raw: Option<&str>) -> Vec<Self> {
        raw.unwrap_or("gzip")
            .split(',')
            .filter_map(|token| Self::parse(token.trim()))
            .collect()
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Brotli => "br",
            Self::Gzip => "gz",
        }
    }
}

fn as_bool(value: Option<&str>) -> bool {
    value == Some("true")
}

fn as_string(value: Option<&str>, fallback: &str) -> String {
    value.unwrap_or(fallback).to_string()
}

fn as_number<T: std::str::FromStr>(value: Option<&str>, fallback: T) -> T {
    value.and_then(|raw| raw.parse().ok()).unwrap_or(fallback)
}

/// Typed options derived from the prefix-filtered environment.
#[derive(Debug, Clone)]
pub struct EnvOptions {
    pub app_title: String,
    pub base: String,
    pub port: u16,
    pub compress: bool,
    pub compress_types: Vec<CompressType>,
    pub devtools: bool,
    pub inject_app_loading: bool,
    pub nitro_mock: bool,
    pub pwa: bool,
    pub visualizer: bool,
}

impl EnvOptions {
    /// Normalize the raw environment mapping.
    ///
    /// Pure and deterministic: boolean keys are true only for the literal
    /// string `true`, numbers fall back when absent or unparsable, and the
    /// compression list keeps only known algorithms.
    pub fn from_env(env: &IndexMap<String, String>) -> Self {
        let get = |key: &str| env.get(key).map(String::as_str);
        let compress_types = CompressType::parse_list(get("VITE_COMPRESS"));
        Self {
            app_title: as_string(get("VITE_APP_TITLE"), DEFAULT_APP_TITLE),
            base: as_string(get("VITE_BASE"), "/"),
            port: as_number(get("VITE_PORT"), DEFAULT_PORT),
            compress: !compress_types.is_empty(),
            compress_types,
            devtools: as_bool(get("VITE_DEVTOOLS")),
            inject_app_loading: as_bool(get("VITE_INJECT_APP_LOADING")),
            nitro_mock: as_bool(get("VITE_NITRO_MOCK")),
            pwa: as_bool(get("VITE_PWA")),
            visualizer: as_bool(get("VITE_VISUALIZER")),
        }
    }

    /// Load the candidate files for `ctx` and normalize in one step.
    pub fn load(ctx: &BuildContext) -> Self {
        let files = config_files(ctx.script.as_deref());
        let env = load_env(&ctx.root, ENV_PREFIX, &files);
        Self::from_env(&env)
    }
}
