//! HTTP gateway: `GET /?text=...` → translation payload.
//!
//! The payload carries its own `code`; the HTTP status is 200 either way.

use std::sync::Arc;

use anyhow::Result;
use axum::{Json, Router, extract::Query, extract::State, routing::get};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use crate::translator::Translator;

const BAD_REQUEST_TEXT: &str = "bad request";
const TEXT_PARAM: &str = "text";

/// First `text` value of the query string; later repeats are ignored.
fn first_text_param(pairs: Vec<(String, String)>) -> Option<String> {
    pairs
        .into_iter()
        .find_map(|(key, value)| (key == TEXT_PARAM).then_some(value))
}

/// Response body of `GET /`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslateResponse {
    /// 200 on an accepted request, 400 when `text` is missing.
    pub code: u16,
    /// Translation, `null` when none could be obtained.
    pub text: Option<String>,
}

impl TranslateResponse {
    fn bad_request() -> Self {
        Self {
            code: 400,
            text: Some(BAD_REQUEST_TEXT.to_string()),
        }
    }

    fn translated(text: Option<String>) -> Self {
        Self { code: 200, text }
    }
}

/// Response body for the gateway health endpoint.
#[derive(Debug, Serialize)]
pub struct GatewayHealthResponse {
    /// Always `healthy` while the server answers.
    pub status: &'static str,
    /// Profiles available to draw identities from.
    pub profiles: usize,
    /// Source language of every translation.
    pub source: String,
    /// Target language of every translation.
    pub target: String,
}

/// Shared state for the HTTP server.
#[derive(Clone)]
pub struct GatewayState {
    /// Translator shared by every request.
    pub translator: Arc<Translator>,
}

async fn handle_translate(
    State(state): State<GatewayState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Json<TranslateResponse> {
    let Some(text) = first_text_param(pairs) else {
        tracing::debug!(
            event = "mimic.gateway.translate.rejected",
            "request without text parameter"
        );
        return Json(TranslateResponse::bad_request());
    };
    match state.translator.translate(&text).await {
        Ok(translated) => {
            tracing::info!(
                event = "mimic.gateway.translate.completed",
                chars = text.chars().count(),
                translated = translated.is_some(),
                "translation request served"
            );
            Json(TranslateResponse::translated(translated))
        }
        Err(error) => {
            tracing::error!(
                event = "mimic.gateway.translate.failed",
                error = %error,
                "translation request failed before any attempt"
            );
            Json(TranslateResponse::translated(None))
        }
    }
}

async fn handle_health(State(state): State<GatewayState>) -> Json<GatewayHealthResponse> {
    let translator = &state.translator;
    Json(GatewayHealthResponse {
        status: "healthy",
        profiles: translator.pipeline().dataset().len(),
        source: translator.source().to_string(),
        target: translator.target().to_string(),
    })
}

/// Build the gateway router (`GET /`, `GET /health`).
pub fn router(translator: Translator) -> Router {
    let state = GatewayState {
        translator: Arc::new(translator),
    };
    Router::new()
        .route("/", get(handle_translate))
        .route("/health", get(handle_health))
        .with_state(state)
}

/// Run the HTTP server; binds to `bind_addr` (e.g. `0.0.0.0:8787`).
/// Graceful shutdown on Ctrl+C (SIGINT) and SIGTERM (Unix); in-flight requests complete before exit.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails.
pub async fn run_http(translator: Translator, bind_addr: &str) -> Result<()> {
    let source = translator.source().to_string();
    let target = translator.target().to_string();
    let app = router(translator);
    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!(
        event = "mimic.gateway.listening",
        bind = bind_addr,
        source = %source,
        target = %target,
        "gateway listening (Ctrl+C/SIGTERM to stop)"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!(event = "mimic.gateway.stopped", "gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};
        let ctrl_c = tokio::signal::ctrl_c();
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {}
                    _ = sigterm.recv() => {}
                }
            }
            Err(error) => {
                tracing::warn!(
                    event = "mimic.gateway.sigterm_unavailable",
                    error = %error,
                    "failed to listen for SIGTERM; Ctrl+C only"
                );
                let _ = ctrl_c.await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %error, "failed to listen for Ctrl+C");
        }
    }
}
