//! Remote call seam: one outbound request per attempt.
//!
//! [`HttpFetcher`] is the production transport; tests substitute their own
//! [`RemoteFetcher`].

use std::time::Instant;

use async_trait::async_trait;
use reqwest::{Client, Url, header};

use crate::error::RequestError;

/// One outbound request: target URL plus the spoofed identity string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRequest {
    /// Fully built target URL.
    pub url: Url,
    /// Sent as the `User-Agent` header.
    pub user_agent: String,
}

/// Performs the remote call for one attempt.
#[async_trait]
pub trait RemoteFetcher: Send + Sync {
    /// Fetch the body text; any non-success response is an error.
    async fn fetch(&self, request: &RemoteRequest) -> Result<String, RequestError>;
}

/// `reqwest`-backed fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Fetcher with a default client.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Transport`] if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, RequestError> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }

    /// Fetcher over an existing client (proxy, TLS or pool settings).
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RemoteFetcher for HttpFetcher {
    async fn fetch(&self, request: &RemoteRequest) -> Result<String, RequestError> {
        let started = Instant::now();
        let response = self
            .client
            .get(request.url.clone())
            .header(header::USER_AGENT, &request.user_agent)
            .send()
            .await
            .map_err(|error| {
                tracing::debug!(
                    event = "mimic.request.http.request_failed",
                    url = %request.url,
                    elapsed_ms = started.elapsed().as_millis(),
                    error = %error,
                    "remote http request failed"
                );
                RequestError::Transport(error)
            })?;
        let status = response.status();
        if !status.is_success() {
            tracing::debug!(
                event = "mimic.request.http.non_success_status",
                status = %status,
                elapsed_ms = started.elapsed().as_millis(),
                "remote http returned non-success status"
            );
            return Err(RequestError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        tracing::debug!(
            event = "mimic.request.http.completed",
            elapsed_ms = started.elapsed().as_millis(),
            bytes = body.len(),
            "remote http body read"
        );
        Ok(body)
    }
}
