//! Webhook intake for gateway callbacks.
//!
//! Verifies the signature, parses the envelope, drops repeats and decrypts
//! the resource. A notification is recorded as processed only after the
//! caller's processing step succeeds, so a failed delivery is taken in
//! again when the gateway retries. The caller answers the gateway with
//! [`NotificationAck`] whatever the outcome.

use std::fmt::Display;
use std::sync::Arc;

use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};

use super::error::NotificationError;
use crate::domain::cipher::PayloadCipher;
use crate::domain::credentials::CredentialStore;
use crate::domain::foundation::GatewayError;
use crate::domain::notification::{Notification, NotificationEnvelope, NotificationVerifier};
use crate::ports::ProcessedNotificationStore;

/// A verified callback with its decrypted resource.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifiedNotification {
    pub envelope: NotificationEnvelope,
    pub resource: serde_json::Value,
}

/// Outcome of handling one delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum Intake {
    /// Not yet processed; the resource is ready for the caller.
    Accepted(VerifiedNotification),
    /// Already handled; acknowledge without processing.
    Duplicate { id: String },
}

impl Intake {
    /// Returns the notification id.
    pub fn id(&self) -> &str {
        match self {
            Intake::Accepted(verified) => &verified.envelope.id,
            Intake::Duplicate { id } => id,
        }
    }
}

/// Response body the gateway expects from a webhook endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAck {
    pub code: String,
    pub message: String,
}

impl NotificationAck {
    /// Acknowledges a handled or duplicate delivery.
    pub fn success() -> Self {
        Self {
            code: "SUCCESS".to_string(),
            message: "成功".to_string(),
        }
    }

    /// Rejects a delivery; the gateway will retry later.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            code: "FAIL".to_string(),
            message: message.into(),
        }
    }

    /// Builds the status and body to answer with.
    pub fn respond(result: &Result<Intake, NotificationError>) -> (StatusCode, Self) {
        match result {
            Ok(_) => (StatusCode::OK, Self::success()),
            Err(err) => (err.status_code(), Self::failure(err.to_string())),
        }
    }
}

/// Handles inbound gateway callbacks end to end.
pub struct NotificationHandler {
    verifier: NotificationVerifier,
    cipher: PayloadCipher,
    store: Arc<dyn ProcessedNotificationStore>,
}

impl NotificationHandler {
    /// Creates a handler over shared credentials and an idempotency store.
    pub fn new(
        credentials: Arc<CredentialStore>,
        store: Arc<dyn ProcessedNotificationStore>,
    ) -> Self {
        Self {
            verifier: NotificationVerifier::new(Arc::clone(&credentials)),
            cipher: PayloadCipher::new(credentials),
            store,
        }
    }

    /// Handles one delivery, running `process` on a first delivery.
    ///
    /// The notification is recorded only after `process` returns `Ok`. If
    /// it fails, nothing is recorded and the redelivery is accepted again.
    /// Concurrent deliveries of the same id may both reach `process`, so it
    /// must tolerate a repeat.
    ///
    /// # Errors
    ///
    /// - `Processing` - `process` failed
    /// - `Gateway` - verification, parsing, decryption or the store failed
    pub fn handle<F, E>(
        &self,
        headers: &HeaderMap,
        body: impl AsRef<[u8]>,
        process: F,
    ) -> Result<Intake, NotificationError>
    where
        F: FnOnce(&VerifiedNotification) -> Result<(), E>,
        E: Display,
    {
        let verified = match self.receive(headers, body)? {
            Intake::Accepted(verified) => verified,
            duplicate => return Ok(duplicate),
        };

        if let Err(err) = process(&verified) {
            tracing::warn!(
                id = %verified.envelope.id,
                error = %err,
                "Notification processing failed, leaving it unrecorded"
            );
            return Err(NotificationError::Processing(err.to_string()));
        }

        if !self.complete(&verified.envelope.id)? {
            tracing::info!(id = %verified.envelope.id, "Notification recorded concurrently");
        }
        Ok(Intake::Accepted(verified))
    }

    /// Verifies, dedupes and decrypts one delivery without recording it.
    ///
    /// Call [`complete`](Self::complete) once the resource has been
    /// processed.
    ///
    /// # Errors
    ///
    /// - `SignatureMismatch` - the signature did not verify
    /// - `AuthenticationFailure` - the resource was tampered with
    /// - `Encoding` - malformed headers or body
    /// - `Configuration` - missing platform certificate or API v3 key
    pub fn receive(
        &self,
        headers: &HeaderMap,
        body: impl AsRef<[u8]>,
    ) -> Result<Intake, GatewayError> {
        let notification = Notification::from_header_map(headers, body)?;
        self.verifier.ensure_verified(&notification)?;

        let envelope = NotificationEnvelope::from_json(&notification.raw_body)?;
        if self.store.contains(&envelope.id)? {
            tracing::info!(id = %envelope.id, "Duplicate notification, skipping");
            return Ok(Intake::Duplicate { id: envelope.id });
        }

        let plaintext = self.cipher.decrypt_resource(&envelope.resource)?;
        let resource: serde_json::Value = serde_json::from_str(&plaintext)?;

        tracing::info!(
            id = %envelope.id,
            event_type = %envelope.event_type,
            "Notification accepted"
        );

        Ok(Intake::Accepted(VerifiedNotification { envelope, resource }))
    }

    /// Records a notification as processed.
    ///
    /// Returns false if it was already recorded.
    pub fn complete(&self, notification_id: &str) -> Result<bool, GatewayError> {
        self.store.mark_processed(notification_id)
    }
}
