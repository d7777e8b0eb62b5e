//! Error taxonomy shared across the library.
//!
//! Network failures are captured into [`crate::fetcher::FetchState`] and
//! never escape as panics; everything else is surfaced synchronously from
//! the offending call so misconfiguration is caught before any request
//! goes out.

/// Common error types for block state operations.
#[derive(Debug, thiserror::Error)]
pub enum BlockError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid query spec: {0}")]
    Validation(String),

    #[error("Index {index} out of bounds for array of length {len}")]
    Index { index: usize, len: usize },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Errors surfaced by the content repository collaborator.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected status code: {code}")]
    Status { code: u16 },

    #[error("Malformed payload: {0}")]
    Malformed(String),
}

impl From<RepositoryError> for BlockError {
    fn from(err: RepositoryError) -> Self {
        BlockError::Network(err.to_string())
    }
}
