//! Retry-until-non-empty remote calls with identity rotation.
//!
//! ```text
//! Attempting(n) ── fetch + transform ──► non-empty ─────────────► Done(Some(v))
//!       ▲                               │
//!       │ resample identity             ▼ empty / failed
//!       └──────────── n < max_retries ──┤
//!                                       └─ n == max_retries ────► Done(None)
//! ```
//!
//! Transport failures, non-success statuses, timeouts and transform errors are
//! all classified as empty. Retries are issued immediately, without backoff.

use std::sync::Arc;
use std::time::Instant;

use mimic_profiles::{FilterSpec, ProfileDataset, ProfileSelector};

use crate::config::PipelineConfig;
use crate::emptiness::Emptiness;
use crate::endpoint::RemoteCall;
use crate::error::RequestError;
use crate::fetch::{HttpFetcher, RemoteFetcher, RemoteRequest};

/// Outcome of one attempt.
enum AttemptOutcome<V> {
    Value(V),
    Empty(&'static str),
}

/// Generic retrying request pipeline.
///
/// Holds only shared, read-only state; every call builds its own selector, so
/// concurrent calls never contend.
#[derive(Clone)]
pub struct RequestPipeline {
    fetcher: Arc<dyn RemoteFetcher>,
    dataset: Arc<ProfileDataset>,
    filter: Option<FilterSpec>,
    config: PipelineConfig,
}

impl RequestPipeline {
    /// HTTP pipeline over the bundled dataset.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: PipelineConfig) -> Result<Self, RequestError> {
        Ok(Self::with_fetcher(Arc::new(HttpFetcher::new()?), config))
    }

    /// Pipeline over a custom fetcher.
    #[must_use]
    pub fn with_fetcher(fetcher: Arc<dyn RemoteFetcher>, config: PipelineConfig) -> Self {
        Self {
            fetcher,
            dataset: ProfileDataset::bundled(),
            filter: None,
            config,
        }
    }

    /// Draw identities from `dataset` instead of the bundled one.
    #[must_use]
    pub fn with_dataset(mut self, dataset: Arc<ProfileDataset>) -> Self {
        self.dataset = dataset;
        self
    }

    /// Restrict identities to profiles matching `filter`.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Active settings.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Dataset identities are drawn from.
    #[must_use]
    pub fn dataset(&self) -> &Arc<ProfileDataset> {
        &self.dataset
    }

    /// Run `call` until `transform` yields a non-empty value or retries run out.
    ///
    /// `transform` turns the raw response body into the caller's value; its
    /// output, not the raw body, is classified and returned.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidOperation`] or
    /// [`RequestError::InvalidBaseUrl`] before any attempt when the call cannot
    /// be built, and [`RequestError::Profile`] when no profile matches the
    /// configured filter. Attempt failures never surface; exhaustion is `Ok(None)`.
    pub async fn request<V, T>(
        &self,
        call: &RemoteCall,
        transform: T,
    ) -> Result<Option<V>, RequestError>
    where
        V: Emptiness,
        T: Fn(&str) -> anyhow::Result<V>,
    {
        let url = call.url(&self.config.base_url)?;
        let mut selector =
            ProfileSelector::with_dataset(Arc::clone(&self.dataset), self.filter.as_ref())?;
        let endpoint = call.endpoint();
        let max_attempts = self.config.max_attempts();

        for attempt in 0..max_attempts {
            if attempt > 0 {
                selector.randomize()?;
            }
            let request = RemoteRequest {
                url: url.clone(),
                user_agent: selector.identity().to_string(),
            };
            match self.attempt(&request, &transform).await {
                AttemptOutcome::Value(value) => {
                    if attempt > 0 {
                        tracing::info!(
                            event = "mimic.request.recovered",
                            endpoint = %endpoint,
                            attempt,
                            "remote call produced a result after retry"
                        );
                    }
                    return Ok(Some(value));
                }
                AttemptOutcome::Empty(reason) => {
                    tracing::debug!(
                        event = "mimic.request.attempt.empty",
                        endpoint = %endpoint,
                        attempt,
                        reason,
                        remaining = max_attempts - attempt - 1,
                        "remote attempt classified empty"
                    );
                }
            }
        }

        tracing::warn!(
            event = "mimic.request.exhausted",
            endpoint = %endpoint,
            attempts = max_attempts,
            "remote call exhausted retries without a result"
        );
        Ok(None)
    }

    async fn attempt<V, T>(&self, request: &RemoteRequest, transform: &T) -> AttemptOutcome<V>
    where
        V: Emptiness,
        T: Fn(&str) -> anyhow::Result<V>,
    {
        let started = Instant::now();
        let fetched = match self.config.attempt_timeout() {
            Some(limit) => tokio::time::timeout(limit, self.fetcher.fetch(request))
                .await
                .unwrap_or(Err(RequestError::Timeout(limit))),
            None => self.fetcher.fetch(request).await,
        };
        let body = match fetched {
            Ok(body) => body,
            Err(error) => {
                tracing::debug!(
                    event = "mimic.request.attempt.failed",
                    user_agent = %request.user_agent,
                    elapsed_ms = started.elapsed().as_millis(),
                    error = %error,
                    "remote attempt failed"
                );
                return AttemptOutcome::Empty("transport");
            }
        };
        match transform(&body) {
            Ok(value) if value.is_empty_result() => AttemptOutcome::Empty("empty_result"),
            Ok(value) => AttemptOutcome::Value(value),
            Err(error) => {
                tracing::debug!(
                    event = "mimic.request.attempt.transform_failed",
                    error = %error,
                    "result transform failed"
                );
                AttemptOutcome::Empty("transform")
            }
        }
    }
}
