//! Core framework transform plugins, unconditionally first in every table.
//!
//! The actual single-file-component and JSX compilation is third-party
//! behavior owned by the bundler; these carry the transform options into the
//! pipeline.

use std::borrow::Cow;

use async_trait::async_trait;

use crate::plugin::Plugin;

/// Script-block options for the component transform.
#[derive(Debug, Clone)]
pub struct ScriptOptions {
    pub define_model: bool,
    pub props_destructure: bool,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            define_model: true,
            props_destructure: false,
        }
    }
}

/// Single-file-component transform.
#[derive(Debug, Clone, Default)]
pub struct FrameworkPlugin {
    script: ScriptOptions,
}

impl FrameworkPlugin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(&self) -> &ScriptOptions {
        &self.script
    }
}

#[async_trait]
impl Plugin for FrameworkPlugin {
    fn name(&self) -> Cow<'static, str> {
        "lark:framework".into()
    }
}

/// JSX transform companion, always registered alongside [`FrameworkPlugin`].
#[derive(Debug, Clone, Default)]
pub struct FrameworkJsxPlugin;

#[async_trait]
impl Plugin for FrameworkJsxPlugin {
    fn name(&self) -> Cow<'static, str> {
        "lark:framework-jsx".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_options_enable_define_model() {
        let plugin = FrameworkPlugin::new();
        assert!(plugin.script().define_model);
        assert!(!plugin.script().props_destructure);
    }
}
