//! Translation relay: accepts a query, fetches the remote's mobile result page
//! behind a rotating browser identity, and answers with the extracted text.
//!
//! # Architecture
//!
//! ```text
//! mimic-gateway/src/
//! ├── lib.rs         # Re-exports (this file)
//! ├── settings.rs    # YAML runtime settings (system + user merge)
//! ├── extract.rs     # result-container extraction, entity decoding
//! ├── translator.rs  # Translator over RequestPipeline
//! ├── http.rs        # axum router, run_http, graceful shutdown
//! ├── cli.rs         # clap definitions (binary only)
//! └── main.rs        # Binary entrypoint
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod extract;
mod http;
mod settings;
mod translator;

// ============================================================================
// Public Re-exports
// ============================================================================

pub use extract::{decode_entities, extract_translation};
pub use http::{
    GatewayHealthResponse, GatewayState, TranslateResponse, router, run_http,
};
pub use settings::{
    DEFAULT_SOURCE_LANG, DEFAULT_TARGET_LANG, PipelineSettings, ProfileSettings, RuntimeSettings,
    TranslateSettings, load_runtime_settings, load_runtime_settings_from_paths,
    runtime_settings_paths, set_config_home_override,
};
pub use translator::Translator;
