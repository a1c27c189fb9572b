//! Retrying remote request pipeline behind rotating browser identities.
//!
//! Each logical call samples a profile from `mimic-profiles`, sends one
//! outbound request carrying that profile's identity string, and retries with
//! a freshly sampled identity while the transformed result is empty.
//!
//! # Architecture
//!
//! ```text
//! mimic-request/src/
//! ├── lib.rs        # Re-exports (this file)
//! ├── error.rs      # RequestError enum
//! ├── config.rs     # PipelineConfig
//! ├── endpoint.rs   # Endpoint, EndpointParams, RemoteCall
//! ├── emptiness.rs  # Emptiness classification
//! ├── fetch.rs      # RemoteFetcher seam + HttpFetcher (reqwest)
//! └── pipeline.rs   # RequestPipeline retry loop
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use mimic_request::{PipelineConfig, RemoteCall, RequestPipeline};
//!
//! let pipeline = RequestPipeline::new(PipelineConfig::default())?;
//! let call = RemoteCall::text("en", "ja", "good morning");
//! let page: Option<String> = pipeline.request(&call, |body| Ok(body.to_string())).await?;
//! ```

mod config;
mod emptiness;
mod endpoint;
mod error;
mod fetch;
mod pipeline;

pub use config::{DEFAULT_BASE_URL, DEFAULT_MAX_RETRIES, PipelineConfig};
pub use emptiness::Emptiness;
pub use endpoint::{Endpoint, EndpointParams, RemoteCall, TextParams};
pub use error::RequestError;
pub use fetch::{HttpFetcher, RemoteFetcher, RemoteRequest};
pub use pipeline::RequestPipeline;
