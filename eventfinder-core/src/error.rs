//! Error types for eventfinder.

use thiserror::Error;

/// Errors that can occur in eventfinder operations.
#[derive(Error, Debug)]
pub enum FinderError {
    #[error("Configuration error: {0}")]
    Config(String),

    /// The event record lacks data the caller needs (e.g. a venue address).
    #[error("Event '{event_id}' is missing field '{field}'")]
    MissingField { event_id: String, field: String },

    #[error("Invalid coordinate for event '{event_id}': {reason}")]
    InvalidCoordinate { event_id: String, reason: String },

    /// `geo::fit` was called without any points.
    #[error("Cannot fit a viewport to zero points")]
    EmptyViewport,

    #[error("Invalid search: {0}")]
    InvalidSearch(String),

    #[error("Ticketmaster API error: {0}")]
    Api(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Scheduler error: {0}")]
    Scheduler(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for FinderError {
    fn from(e: serde_json::Error) -> Self {
        FinderError::Serialization(e.to_string())
    }
}

/// Result type alias for eventfinder operations.
pub type FinderResult<T> = Result<T, FinderError>;
