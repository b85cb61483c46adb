//! Error types for the controller's external seams.

use thiserror::Error;

/// Controller error type.
///
/// Actions never return this to their caller; it travels from a seam
/// ([`Backend`](crate::api::Backend), [`RealtimeChannel`](crate::realtime::RealtimeChannel))
/// to the [`Reporter`](crate::telemetry::Reporter).
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The real-time channel is closed or rejected a frame.
    #[error("Channel error: {0}")]
    Channel(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Result type alias for controller operations.
pub type Result<T> = std::result::Result<T, Error>;
