//! Application assembly: env-derived options, the application plugin table,
//! and the kind-specific configuration layer.

use crate::builder::{
    BuildSection, BuilderConfig, EsTarget, OutputNaming, ServerSection, TransformSection,
};
use crate::context::BuildContext;
use crate::env::EnvOptions;
use crate::error::Result;
use crate::merge::{merge_config, merge_config_value};
use crate::options::ApplicationOptions;
use crate::plugins::{application_plugins, resolve_condition_plugins};

use super::common::common_config;
use super::{ConfigFactory, ResolvedConfig, UserConfigProvider};

pub(super) async fn assemble_application(
    ctx: &BuildContext,
    provider: Option<&UserConfigProvider>,
) -> Result<ResolvedConfig> {
    let user = ConfigFactory::user_config(ctx, provider).await?;
    let env = EnvOptions::load(ctx);

    let mut options = ApplicationOptions::default();
    options.common.build = ctx.is_build();
    options.common.mode = ctx.mode.clone();
    options.overlay_env(&env);
    if let Some(patch) = &user.application {
        options.apply(patch);
    }

    let plugins = resolve_condition_plugins(application_plugins(&options, ctx)).await?;

    let application = application_config(ctx, &env);
    let merged = merge_config(&common_config(), &application)?;
    let builder = merge_config_value(&merged, &user.builder)?;

    Ok(ResolvedConfig { builder, plugins })
}

fn application_config(ctx: &BuildContext, env: &EnvOptions) -> BuilderConfig {
    BuilderConfig {
        base: env.base.clone(),
        build: BuildSection {
            target: Some(EsTarget::ES2020),
            output: OutputNaming {
                asset_file_names: Some("[ext]/[name]-[hash].[ext]".to_string()),
                chunk_file_names: Some("js/[name]-[hash].js".to_string()),
                entry_file_names: Some("jse/index-[name]-[hash].js".to_string()),
            },
            ..BuildSection::default()
        },
        transform: TransformSection {
            // Debugger statements are stripped from production output only.
            drop: if ctx.is_build() {
                vec!["debugger".to_string()]
            } else {
                Vec::new()
            },
            legal_comments: "none".to_string(),
        },
        server: ServerSection {
            host: true,
            port: Some(env.port),
            warmup: vec![
                "./index.html".to_string(),
                "./src/main.ts".to_string(),
                "./src/{views,layouts,router,store,api,adapter}/*".to_string(),
            ],
        },
    }
}
