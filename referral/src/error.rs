//! Error types for the referral client.

/// Failures of the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected status: {0}")]
    Status(u16),
}

/// Outcome of a failed referral program call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UrpError {
    /// The request failed or its body could not be decoded. Callers only
    /// learn that the endpoint is unusable; the cause is logged.
    #[error("Endpoint error")]
    Endpoint,
}

impl From<TransportError> for UrpError {
    fn from(_: TransportError) -> Self {
        UrpError::Endpoint
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("URP_API_KEY environment variable is required")]
    MissingApiKey,

    #[error("Invalid referral host: {0}")]
    InvalidHost(String),
}
