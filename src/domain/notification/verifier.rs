//! Gateway notification signature verification.
//!
//! The gateway signs `"{timestamp}\n{nonce}\n{body}\n"` with the private key
//! of one of its platform certificates. Verification selects that
//! certificate by the serial carried in the `Wechatpay-Serial` header.

use std::sync::Arc;

use http::HeaderMap;

use super::headers::Notification;
use crate::domain::credentials::CredentialStore;
use crate::domain::foundation::GatewayError;
use crate::domain::signing::{rsa_sha256, CanonicalString};

/// Verifies inbound notifications against platform certificates.
#[derive(Debug, Clone)]
pub struct NotificationVerifier {
    credentials: Arc<CredentialStore>,
}

impl NotificationVerifier {
    /// Creates a verifier reading from the given credentials.
    pub fn new(credentials: Arc<CredentialStore>) -> Self {
        Self { credentials }
    }

    /// Returns whether the notification was signed by the gateway.
    ///
    /// A merely invalid signature yields `Ok(false)`.
    ///
    /// # Errors
    ///
    /// - `Encoding` - the signature is not base64
    /// - `Configuration` - no platform certificate can be selected
    pub fn verify(&self, notification: &Notification) -> Result<bool, GatewayError> {
        let certificate = self
            .credentials
            .select_platform_certificate(notification.serial.as_ref())?;

        let canonical = CanonicalString::notification(
            &notification.timestamp,
            &notification.nonce,
            &notification.raw_body,
        );

        let verified = rsa_sha256::verify(
            certificate.public_key(),
            canonical.as_bytes(),
            &notification.signature,
        )?;

        if verified {
            tracing::debug!(
                serial = %certificate.serial(),
                timestamp = %notification.timestamp,
                "Notification signature verified"
            );
        } else {
            tracing::warn!(
                serial = %certificate.serial(),
                timestamp = %notification.timestamp,
                "Notification signature rejected"
            );
        }

        Ok(verified)
    }

    /// Parses the headers and verifies the notification in one step.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Encoding` for missing headers or a body that
    /// is not UTF-8, before any signature is checked.
    pub fn verify_headers(
        &self,
        headers: &HeaderMap,
        raw_body: impl AsRef<[u8]>,
    ) -> Result<bool, GatewayError> {
        self.verify(&Notification::from_header_map(headers, raw_body)?)
    }

    /// Like [`verify`](Self::verify), but a mismatch is an error.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::SignatureMismatch` when the signature does not verify.
    pub fn ensure_verified(&self, notification: &Notification) -> Result<(), GatewayError> {
        if self.verify(notification)? {
            Ok(())
        } else {
            Err(GatewayError::SignatureMismatch)
        }
    }
}
