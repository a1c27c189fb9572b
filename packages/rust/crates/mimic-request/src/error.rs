//! Error types for remote requests.
//!
//! Only [`RequestError::InvalidOperation`], [`RequestError::InvalidBaseUrl`] and
//! [`RequestError::Profile`] ever leave the pipeline; the rest are attempt-level
//! failures folded into the empty-result retry path.

use std::time::Duration;

use mimic_profiles::ProfileError;
use thiserror::Error;

/// Errors for endpoint resolution and remote attempts.
#[derive(Debug, Error)]
pub enum RequestError {
    /// Unknown endpoint name, mismatched parameters or unsupported endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidOperation(String),

    /// Configured base URL cannot be parsed
    #[error("Invalid base url {url}: {reason}")]
    InvalidBaseUrl {
        /// Offending base URL.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// No profile could be selected for the request
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// Remote answered with a non-success status
    #[error("Remote responded with status {0}")]
    Status(u16),

    /// Connection or body read failure
    #[error("Remote request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Attempt exceeded the configured timeout
    #[error("Remote request timed out after {0:?}")]
    Timeout(Duration),
}
