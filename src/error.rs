//! Error types for the dashboard's data layer.
//!
//! `DashboardError` covers everything that can go wrong between the network
//! and the token store: transport, API-level failures reported inside the
//! status envelope, decoding, and push-channel protocol violations.
use thiserror::Error;

/// Unified error type for fetch and push-channel code.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Transport-level failure talking to the REST service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered but reported a non-zero `error_code`.
    #[error("API error {code}: {message}")]
    Api { code: i64, message: String },

    /// Payload was not the JSON shape we expected.
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Frame that does not follow the Engine.IO / Socket.IO framing.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Base URL that cannot be turned into an endpoint.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Crate-wide `Result` alias with `DashboardError` as the default error.
pub type Result<T, E = DashboardError> = std::result::Result<T, E>;
