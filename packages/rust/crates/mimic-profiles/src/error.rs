//! Error types for profile selection.
//!
//! Library crates use `thiserror` for explicit error enums.

use thiserror::Error;

/// Errors for dataset loading, filter parsing and profile selection.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The filter matched zero profiles in the dataset.
    #[error("No user agents matched your filters")]
    NoMatch,

    /// A draw could not be resolved against the cumulative table.
    #[error("Error finding a random user agent (draw={draw}, entries={entries})")]
    Sampling {
        /// The uniform draw that failed to resolve.
        draw: f64,
        /// Number of entries in the cumulative table.
        entries: usize,
    },

    /// Cannot read the dataset file
    #[error("Failed to read profile dataset at {path}: {source}")]
    DatasetRead {
        /// Dataset path.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Dataset is not a JSON array of profile records
    #[error("Failed to parse profile dataset: {0}")]
    DatasetParse(#[from] serde_json::Error),

    /// Invalid `$regex` in a filter document
    #[error("Invalid filter pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Filter document has an unsupported shape
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
}
