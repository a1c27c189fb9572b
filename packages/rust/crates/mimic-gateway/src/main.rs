//! mimic-gateway CLI: HTTP relay or one-shot translation.
//!
//! Settings come from `packages/conf/settings.yaml` and the user config home
//! (`--conf <dir>` overrides it).
//!
//! Logging: set `RUST_LOG=mimic_request=debug` (or `warn`, `info`) to see attempt logs on stderr.

mod cli;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mimic_gateway::{
    RuntimeSettings, TranslateResponse, Translator, load_runtime_settings, run_http,
    set_config_home_override,
};

use crate::cli::{Cli, Command};

const DEFAULT_LOG_FILTER: &str = "mimic_gateway=info,mimic_request=info,mimic_profiles=warn";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }

    // RUST_LOG overrides the default filter
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let runtime_settings = load_runtime_settings();

    match cli.command {
        Command::Serve { bind } => {
            let translator = build_translator(&runtime_settings, None, None)?;
            run_http(translator, &bind).await
        }
        Command::Translate {
            text,
            source,
            target,
        } => {
            let translator = build_translator(&runtime_settings, source, target)?;
            let translated = translator.translate(&text).await?;
            let payload = TranslateResponse {
                code: 200,
                text: translated,
            };
            println!("{}", serde_json::to_string(&payload)?);
            Ok(())
        }
    }
}

fn build_translator(
    settings: &RuntimeSettings,
    source: Option<String>,
    target: Option<String>,
) -> anyhow::Result<Translator> {
    let pipeline = settings
        .build_pipeline()
        .context("build request pipeline from settings")?;
    let source = source.unwrap_or_else(|| settings.source_lang().to_string());
    let target = target.unwrap_or_else(|| settings.target_lang().to_string());
    Ok(Translator::new(Arc::new(pipeline), source, target))
}
