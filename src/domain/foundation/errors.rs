//! Error taxonomy for signing, verification and payload protection.
//!
//! Callers react differently to each outcome, so the four kinds stay
//! distinct and inspectable instead of collapsing into one failure.

use http::StatusCode;
use thiserror::Error;

/// Errors surfaced by the gateway security core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Missing or malformed key, certificate or API key. Fatal.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A signature did not verify against the selected public key.
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// AEAD tag check failed; the payload must be treated as tampered.
    #[error("Authentication failure")]
    AuthenticationFailure,

    /// Malformed base64, hex, UTF-8 or JSON input.
    #[error("Encoding error: {0}")]
    Encoding(String),
}

impl GatewayError {
    /// Creates a configuration error.
    pub fn configuration(reason: impl Into<String>) -> Self {
        GatewayError::Configuration(reason.into())
    }

    /// Creates an encoding error.
    pub fn encoding(reason: impl Into<String>) -> Self {
        GatewayError::Encoding(reason.into())
    }

    /// Returns true if repeating the same operation could succeed.
    ///
    /// Nothing in this core is transient; retries belong to the transport.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Maps the error to the status a webhook endpoint should answer with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::SignatureMismatch => StatusCode::UNAUTHORIZED,
            GatewayError::AuthenticationFailure | GatewayError::Encoding(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl From<base64::DecodeError> for GatewayError {
    fn from(err: base64::DecodeError) -> Self {
        GatewayError::Encoding(format!("invalid base64: {}", err))
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Encoding(format!("invalid JSON: {}", err))
    }
}
