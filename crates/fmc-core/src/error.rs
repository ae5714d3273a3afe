//! Error types for FMC operations.
//!
//! Every failure an FMC client can surface maps onto one of a small set of
//! variants. Request, decode and encode failures carry the URL that was being
//! addressed so operators can line them up with management-center logs.

use thiserror::Error;

/// Main error type for FMC operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The request could not be built or sent, the transport failed, the call
    /// was cancelled, or the server answered with an unexpected status.
    #[error("Request failed: {url} - {message}")]
    Request {
        /// URL that was being requested
        url: String,
        /// HTTP status returned by the server, when one was received
        status: Option<u16>,
        /// Proximate cause
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("Failed to decode response: {url} - {message}")]
    Decode {
        /// URL the body was received from
        url: String,
        /// Parser error
        message: String,
    },

    /// The request payload could not be serialized.
    #[error("Failed to encode request: {url} - {message}")]
    Encode {
        /// URL the payload was destined for
        url: String,
        /// Serializer error
        message: String,
    },

    /// No matching entity was found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Specialized result type for FMC operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a [`Error::Request`] that never reached the server.
    pub fn request(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Request {
            url: url.into(),
            status: None,
            message: message.into(),
        }
    }

    /// Build a [`Error::Request`] for an unexpected response status.
    pub fn unexpected_status(url: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        Self::Request {
            url: url.into(),
            status: Some(status),
            message: message.into(),
        }
    }

    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Request { .. } => "REQUEST_ERROR",
            Self::Decode { .. } => "DECODE_ERROR",
            Self::Encode { .. } => "ENCODE_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }

    /// HTTP status carried by a [`Error::Request`], if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => *status,
            _ => None,
        }
    }

    /// Returns true for a request the server answered with `404 Not Found`.
    #[must_use]
    pub const fn is_http_not_found(&self) -> bool {
        matches!(self.status(), Some(404))
    }
}

// Conversions from external error types
impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::Config(format!("Invalid URL: {err}"))
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::Config(err.to_string())
    }
}
