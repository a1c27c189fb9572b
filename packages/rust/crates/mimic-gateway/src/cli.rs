use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mimic-gateway")]
#[command(about = "Translation relay behind rotating browser identities. Serve over HTTP or translate once.")]
pub(crate) struct Cli {
    /// Override config directory (reads `<dir>/mimic/settings.yaml`).
    #[arg(long, global = true)]
    pub(crate) conf: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Run HTTP server (GET /?text=...). Default bind: 0.0.0.0:8787
    Serve {
        /// Listen address (e.g. 127.0.0.1:8787)
        #[arg(long, default_value = "0.0.0.0:8787")]
        bind: String,
    },
    /// Translate one text and print the result as JSON.
    Translate {
        /// Text to translate
        #[arg(long)]
        text: String,

        /// Source language (default: settings, then `en`)
        #[arg(long)]
        source: Option<String>,

        /// Target language (default: settings, then `ja`)
        #[arg(long)]
        target: Option<String>,
    },
}
