//! Pipeline error types.
//!
//! Every failure mode has a named variant. No stringly-typed errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed market snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Empty snapshot: no tags for brand '{0}'")]
    EmptySnapshot(String),
}

/// Result type alias for market data operations.
pub type MarketDataResult<T> = Result<T, MarketDataError>;
