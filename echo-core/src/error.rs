//! Error types for the Echo API.

use thiserror::Error;

/// Label and message returned when the method is outside the allowlist.
pub(crate) const METHOD_NOT_ALLOWED_LABEL: &str = "Method Not Allowed";
pub(crate) const METHOD_NOT_ALLOWED_MESSAGE: &str = "Only GET and POST methods are supported";

/// Label and message returned when a response could not be encoded.
pub(crate) const INTERNAL_ERROR_LABEL: &str = "Internal Server Error";
pub(crate) const INTERNAL_ERROR_MESSAGE: &str = "Failed to process response";

/// Errors that can end an echo invocation on the failure path.
#[derive(Error, Debug)]
pub enum EchoError {
    /// The invocation used a method outside the allowlist
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Serializing a response failed
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl EchoError {
    /// HTTP status code reported to proxy callers.
    pub fn status_code(&self) -> u16 {
        match self {
            EchoError::MethodNotAllowed(_) => 405,
            EchoError::Encoding(_) => 500,
        }
    }

    /// Stable category label placed in the `error` field of the response.
    pub fn label(&self) -> &'static str {
        match self {
            EchoError::MethodNotAllowed(_) => METHOD_NOT_ALLOWED_LABEL,
            EchoError::Encoding(_) => INTERNAL_ERROR_LABEL,
        }
    }

    /// Human-readable message shown to the caller.
    ///
    /// Never contains the internal error text.
    pub fn public_message(&self) -> &'static str {
        match self {
            EchoError::MethodNotAllowed(_) => METHOD_NOT_ALLOWED_MESSAGE,
            EchoError::Encoding(_) => INTERNAL_ERROR_MESSAGE,
        }
    }
}

/// Result type alias for echo operations
pub type Result<T> = std::result::Result<T, EchoError>;
