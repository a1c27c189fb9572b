//! HTTP gateway integration tests: bad request payload, translation payload, health.
//! Uses a canned fetcher so no external services are required.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::body::Body;
use axum::body::to_bytes;
use axum::http::{Request, StatusCode};
use mimic_gateway::{Translator, router};
use mimic_request::{
    PipelineConfig, RemoteFetcher, RemoteRequest, RequestError, RequestPipeline,
};
use serde_json::Value;
use tower::ServiceExt;

/// Answers every attempt with the same page and counts calls.
struct CannedFetcher {
    page: String,
    calls: AtomicUsize,
    last_query: std::sync::Mutex<Option<String>>,
}

impl CannedFetcher {
    fn new(page: &str) -> Arc<Self> {
        Arc::new(Self {
            page: page.to_string(),
            calls: AtomicUsize::new(0),
            last_query: std::sync::Mutex::new(None),
        })
    }
}

#[async_trait]
impl RemoteFetcher for CannedFetcher {
    async fn fetch(&self, request: &RemoteRequest) -> Result<String, RequestError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        *self.last_query.lock().unwrap() = request.url.query().map(str::to_string);
        Ok(self.page.clone())
    }
}

fn translator_over(fetcher: Arc<CannedFetcher>) -> Translator {
    let pipeline = RequestPipeline::with_fetcher(fetcher, PipelineConfig::default());
    Translator::new(Arc::new(pipeline), "en", "ja")
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn gateway_returns_bad_request_payload_without_text() {
    let fetcher = CannedFetcher::new("");
    let app = router(translator_over(Arc::clone(&fetcher)));

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["code"], 400);
    assert_eq!(body["text"], "bad request");
    assert_eq!(fetcher.calls.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn gateway_returns_translation_payload() {
    let fetcher = CannedFetcher::new(
        r#"<html><div class="result-container">おはよう &amp; こんにちは</div></html>"#,
    );
    let app = router(translator_over(Arc::clone(&fetcher)));

    let response = app
        .oneshot(
            Request::get("/?text=good%20morning")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["code"], 200);
    assert_eq!(body["text"], "おはよう & こんにちは");
    assert_eq!(fetcher.calls.load(Ordering::Relaxed), 1);
    assert_eq!(
        fetcher.last_query.lock().unwrap().as_deref(),
        Some("sl=en&tl=ja&q=good+morning")
    );
}

#[tokio::test]
async fn gateway_returns_null_text_when_every_attempt_is_empty() {
    let fetcher = CannedFetcher::new("<html>unusual traffic</html>");
    let app = router(translator_over(Arc::clone(&fetcher)));

    let response = app
        .oneshot(Request::get("/?text=hello").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["code"], 200);
    assert!(body["text"].is_null());
    assert_eq!(fetcher.calls.load(Ordering::Relaxed), 4);
}

#[tokio::test]
async fn gateway_accepts_empty_text_parameter() {
    let fetcher = CannedFetcher::new(r#"<div class="result-container">x</div>"#);
    let app = router(translator_over(Arc::clone(&fetcher)));

    let response = app
        .oneshot(Request::get("/?text=").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["code"], 200);
    assert_eq!(fetcher.calls.load(Ordering::Relaxed), 1);
}

#[tokio::test]
async fn gateway_translates_first_of_repeated_text_parameters() {
    let fetcher = CannedFetcher::new(r#"<div class="result-container">ア</div>"#);
    let app = router(translator_over(Arc::clone(&fetcher)));

    let response = app
        .oneshot(Request::get("/?text=a&text=b").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["code"], 200);
    assert_eq!(body["text"], "ア");
    assert_eq!(
        fetcher.last_query.lock().unwrap().as_deref(),
        Some("sl=en&tl=ja&q=a")
    );
}

#[tokio::test]
async fn gateway_treats_other_parameters_without_text_as_bad_request() {
    let fetcher = CannedFetcher::new("");
    let app = router(translator_over(Arc::clone(&fetcher)));

    let response = app
        .oneshot(Request::get("/?q=hello&lang=ja").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["code"], 400);
    assert_eq!(body["text"], "bad request");
    assert_eq!(fetcher.calls.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn gateway_returns_404_for_unknown_route() {
    let app = router(translator_over(CannedFetcher::new("")));

    let response = app
        .oneshot(Request::get("/unknown").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn gateway_health_reports_profiles_and_languages() {
    let app = router(translator_over(CannedFetcher::new("")));

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["source"], "en");
    assert_eq!(body["target"], "ja");
    assert!(body["profiles"].as_u64().unwrap() > 0);
}
