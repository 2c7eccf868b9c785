//! Error types for the PR review finder.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for finder operations
pub type Result<T> = std::result::Result<T, FinderError>;

/// Errors that can occur while loading config or building a search.
#[derive(Debug, Error)]
pub enum FinderError {
    /// Channel config file does not exist
    #[error("{} not found", .0.display())]
    ConfigNotFound(PathBuf),

    /// Channel config file is not valid YAML (or has the wrong shape)
    #[error("Failed to parse {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Channel filter matched neither an ID nor a display name
    #[error("Channel '{0}' not found")]
    ChannelNotFound(String),

    /// Lookback window reaches past the representable date range
    #[error("Lookback of {0} days is out of range")]
    InvalidLookback(u32),

    /// Repo pattern is not a valid regex
    #[error("Invalid repo pattern '{pattern}': {source}")]
    InvalidRepoPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
