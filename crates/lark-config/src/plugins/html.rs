//! Entry-page post-processing.
//!
//! Templating itself is third-party behavior; this plugin only minifies the
//! final page when asked (comments stripped, inter-tag whitespace collapsed).

use std::borrow::Cow;
use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

use crate::error::Result;
use crate::plugin::Plugin;

fn comment_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern"))
}

fn between_tags_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r">\s+<").expect("between-tags pattern"))
}

#[derive(Debug)]
pub struct HtmlPlugin {
    minify: bool,
}

impl HtmlPlugin {
    pub fn new(minify: bool) -> Self {
        Self { minify }
    }
}

#[async_trait]
impl Plugin for HtmlPlugin {
    fn name(&self) -> Cow<'static, str> {
        "lark:html".into()
    }

    async fn transform_index_html(&self, html: String) -> Result<String> {
        if !self.minify {
            return Ok(html);
        }
        let stripped = comment_pattern().replace_all(&html, "");
        let collapsed = between_tags_pattern().replace_all(&stripped, "><");
        Ok(collapsed.trim().to_string())
    }
}
