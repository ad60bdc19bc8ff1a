use thiserror::Error;

/// A convenience `Result` alias using [`CourierError`].
pub type CourierResult<T> = Result<T, CourierError>;

/// Top-level error type for Courier.
///
/// Configuration errors are raised before any external call is made;
/// every other variant comes from the transport that was invoked.
#[derive(Error, Debug)]
pub enum CourierError {
    /// A collaborator or setting required by the selected mode is missing.
    #[error("Config error: {0}")]
    Config(String),

    /// The external call failed (HTTP status, Slack API error, network).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The stdout output callback failed.
    #[error("Output error: {0}")]
    Output(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CourierError {
    /// Returns `true` for errors caused by missing configuration.
    pub fn is_config(&self) -> bool {
        matches!(self, CourierError::Config(_))
    }
}
