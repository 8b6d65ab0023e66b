//! Loading-screen markup injected into the entry page while the app boots.

use std::borrow::Cow;
use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::plugin::{Plugin, SharedPlugin, shared};

/// File name of a per-project loading template override.
const LOADING_TEMPLATE: &str = "loading.html";

const DEFAULT_LOADING_HTML: &str = r#"<div id="__app-loading__">
  <style>
    #__app-loading__ {
      position: fixed;
      inset: 0;
      display: flex;
      align-items: center;
      justify-content: center;
      flex-direction: column;
      background: #ffffff;
    }
    #__app-loading__ .loading-spin {
      width: 48px;
      height: 48px;
      border: 4px solid #e5e7eb;
      border-top-color: #0960bd;
      border-radius: 50%;
      animation: app-loading-rotate 0.9s linear infinite;
    }
    @keyframes app-loading-rotate {
      to { transform: rotate(360deg); }
    }
  </style>
  <div class="loading-spin"></div>
  <div class="loading-title">{{title}}</div>
</div>"#;

/// Markup injection right after the opening `<body>` tag.
#[derive(Debug)]
pub struct AppLoadingPlugin {
    markup: String,
}

impl AppLoadingPlugin {
    /// Build from a ready template; `{{title}}` placeholders are substituted.
    pub fn new(template: &str, app_title: &str) -> Self {
        Self {
            markup: template.replace("{{title}}", app_title),
        }
    }

    /// Read a `loading.html` override from the project root when present,
    /// falling back to the built-in template. Reading suspends, which is why
    /// this plugin's table entry uses an async factory.
    pub async fn load(root: &Path, app_title: &str) -> Result<SharedPlugin> {
        let override_path = root.join(LOADING_TEMPLATE);
        let template = if override_path.is_file() {
            tokio::fs::read_to_string(&override_path).await?
        } else {
            DEFAULT_LOADING_HTML.to_string()
        };
        Ok(shared(Self::new(&template, app_title)))
    }
}

#[async_trait]
impl Plugin for AppLoadingPlugin {
    fn name(&self) -> Cow<'static, str> {
        "lark:app-loading".into()
    }

    async fn transform_index_html(&self, html: String) -> Result<String> {
        Ok(inject_after_body(&html, &self.markup))
    }
}

/// Insert `markup` directly after the opening `<body ...>` tag; the page is
/// returned unchanged when no body tag exists.
fn inject_after_body(html: &str, markup: &str) -> String {
    let Some(start) = html.find("<body") else {
        return html.to_string();
    };
    let Some(close) = html[start..].find('>') else {
        return html.to_string();
    };
    let insert_at = start + close + 1;
    let mut result = String::with_capacity(html.len() + markup.len() + 1);
    result.push_str(&html[..insert_at]);
    result.push('\n');
    result.push_str(markup);
    result.push_str(&html[insert_at..]);
    result
}
