//! Errors raised while shaping gateway requests and handling callbacks.

use http::StatusCode;
use thiserror::Error;

use crate::domain::foundation::GatewayError;

/// Failure to build a signed gateway request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// A field the endpoint requires was not supplied.
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// Parameters were not a JSON object or could not be serialized.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Signing failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::InvalidParameters(err.to_string())
    }
}

impl From<http::header::InvalidHeaderValue> for RequestError {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        RequestError::InvalidParameters(format!("invalid header value: {}", err))
    }
}

/// Failure to take in a gateway callback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    /// Verification, parsing or decryption failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The caller's processing step failed; the notification stays
    /// unrecorded so a redelivery is taken in again.
    #[error("Notification processing failed: {0}")]
    Processing(String),
}

impl NotificationError {
    /// Maps the error to the status a webhook endpoint should answer with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            NotificationError::Gateway(err) => err.status_code(),
            NotificationError::Processing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns true if the gateway should redeliver.
    pub fn is_retryable(&self) -> bool {
        match self {
            NotificationError::Gateway(err) => err.is_retryable(),
            NotificationError::Processing(_) => true,
        }
    }
}
