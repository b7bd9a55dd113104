//! Error types for the airtime service.

/// Top-level error type for service startup and configuration.
///
/// Nothing in the request path returns this: analysis requests always
/// resolve to a result, falling back when the provider or parser fails.
#[derive(Debug, thiserror::Error)]
pub enum AirtimeError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// HTTP server bind or serve error.
    #[error("server error: {0}")]
    Server(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AirtimeError>;
