//! Text translation over the retrying request pipeline.

use std::sync::Arc;

use mimic_request::{RemoteCall, RequestError, RequestPipeline};

use crate::extract::extract_translation;

/// Fixed language pair translator sharing one pipeline.
#[derive(Clone)]
pub struct Translator {
    pipeline: Arc<RequestPipeline>,
    source: String,
    target: String,
}

impl Translator {
    /// Translator for `source` → `target`.
    pub fn new(
        pipeline: Arc<RequestPipeline>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            pipeline,
            source: source.into(),
            target: target.into(),
        }
    }

    /// Source language code.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Target language code.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Underlying pipeline.
    #[must_use]
    pub fn pipeline(&self) -> &RequestPipeline {
        &self.pipeline
    }

    /// Translate `query`; `None` when every attempt came back empty.
    ///
    /// # Errors
    ///
    /// Returns an error only for failures that no retry can fix: a bad base
    /// URL or a profile filter matching nothing.
    pub async fn translate(&self, query: &str) -> Result<Option<String>, RequestError> {
        let call = RemoteCall::text(self.source.as_str(), self.target.as_str(), query);
        let translated = self
            .pipeline
            .request(&call, |page| Ok(extract_translation(page)))
            .await?;
        Ok(translated.flatten())
    }
}
