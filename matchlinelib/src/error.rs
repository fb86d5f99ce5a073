//! Error types for matchlinelib

use thiserror::Error;

/// Errors that can occur while querying, traversing or fetching event data
#[derive(Error, Debug)]
pub enum MatchlineError {
    /// A path segment was applied to null or a non-container value
    #[error("cannot traverse '{segment}' in path '{path}': {reason}")]
    PathTraversal {
        path: String,
        segment: String,
        reason: String,
    },

    /// A path string was empty or contained an empty segment
    #[error("invalid path '{0}': paths must be non-empty dotted key sequences")]
    EmptyPath(String),

    /// A sort specification could not be parsed
    #[error("invalid sort specification '{0}'")]
    InvalidSortSpec(String),

    /// The HTTP request to the event API failed
    #[error("event API request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The event API answered with a non-success status
    #[error("event API returned {status} for {url}")]
    ApiStatus { status: u16, url: String },

    /// The event API response was not the expected JSON shape
    #[error("failed to decode event API response from {url}: {message}")]
    Decode { url: String, message: String },

    /// Required configuration was missing or malformed
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
