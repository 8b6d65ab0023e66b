//! Progressive-web-app manifest emission and link injection.

use std::borrow::Cow;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::plugin::{Bundle, Plugin};

const MANIFEST_FILE_NAME: &str = "manifest.webmanifest";

/// One manifest icon entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub icon_type: String,
}

/// Web-app manifest serialized to `manifest.webmanifest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub display: String,
    pub start_url: String,
    pub theme_color: String,
    pub icons: Vec<ManifestIcon>,
}

impl WebManifest {
    /// Standard manifest for `app_title`; off build the name and short name
    /// carry a ` dev` suffix so installed dev and prod apps stay apart.
    pub fn standard(app_title: &str, build: bool) -> Self {
        let suffix = if build { "" } else { " dev" };
        let name = format!("{app_title}{suffix}");
        Self {
            short_name: name.clone(),
            name,
            description: String::new(),
            display: "standalone".to_string(),
            start_url: "/".to_string(),
            theme_color: "#ffffff".to_string(),
            icons: Vec::new(),
        }
    }
}

/// Emits the manifest asset and links it from the entry page.
#[derive(Debug)]
pub struct PwaPlugin {
    manifest: WebManifest,
}

impl PwaPlugin {
    pub fn new(manifest: WebManifest) -> Self {
        Self { manifest }
    }

    pub fn manifest(&self) -> &WebManifest {
        &self.manifest
    }
}

#[async_trait]
impl Plugin for PwaPlugin {
    fn name(&self) -> Cow<'static, str> {
        "lark:pwa".into()
    }

    async fn generate_bundle(&self, bundle: &mut Bundle) -> Result<()> {
        let source = serde_json::to_string_pretty(&self.manifest)
            .map_err(|err| crate::error::ConfigError::InvalidValue(err.to_string()))?;
        bundle.emit_asset(MANIFEST_FILE_NAME, source)?;
        Ok(())
    }

    async fn transform_index_html(&self, html: String) -> Result<String> {
        let link = format!("<link rel=\"manifest\" href=\"/{MANIFEST_FILE_NAME}\">");
        Ok(match html.find("</head>") {
            Some(at) => format!("{}{link}\n{}", &html[..at], &html[at..]),
            None => format!("{html}\n{link}"),
        })
    }
}
