//! Error types for admonition-filter.

use thiserror::Error;

/// Result type for filter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, filtering or writing a document.
#[derive(Error, Debug)]
pub enum Error {
    /// The input is not valid Pandoc JSON.
    #[error("Failed to parse Pandoc JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Error occurred during stream or file I/O.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document was produced by a Pandoc API version we cannot read.
    #[error("Unsupported pandoc-api-version: {0}")]
    UnsupportedApiVersion(String),

    /// A known block kind carried content of the wrong shape.
    #[error("Malformed {tag} block: {source}")]
    MalformedBlock {
        tag: String,
        #[source]
        source: serde_json::Error,
    },
}
