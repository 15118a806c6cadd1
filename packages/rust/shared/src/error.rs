//! Error types for ScrapeFlow.
//!
//! Library crates use [`ScrapeFlowError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all ScrapeFlow operations.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeFlowError {
    /// A URL candidate that failed absolute-URL parsing.
    #[error("invalid URL: {candidate}")]
    InvalidUrl { candidate: String },

    /// A URL already present in the pending list (exact, case-sensitive match).
    #[error("duplicate URL: {url}")]
    DuplicateUrl { url: String },

    /// Batch submit called with an empty URL list.
    #[error("no URLs to submit")]
    NoUrls,

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// A single task submission rejected by the crawl sink.
    #[error("submit error: {0}")]
    Submit(String),

    /// Data validation error (out-of-range option, unknown provider, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScrapeFlowError>;

impl ScrapeFlowError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
