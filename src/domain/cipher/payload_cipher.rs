//! PayloadCipher - both payload transforms bound to one merchant's credentials.

use std::sync::Arc;

use super::aead::{self, EncryptedResource};
use super::oaep;
use crate::domain::credentials::{CredentialStore, SerialNumber};
use crate::domain::foundation::GatewayError;

/// A sensitive field encrypted for a specific platform certificate.
///
/// The serial tells the gateway which of its keys decrypts the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensitiveField {
    /// Base64 RSA-OAEP ciphertext.
    pub ciphertext: String,
    /// Serial of the platform certificate used.
    pub platform_serial: SerialNumber,
}

/// Decrypts notification resources and encrypts sensitive outbound fields.
#[derive(Debug, Clone)]
pub struct PayloadCipher {
    credentials: Arc<CredentialStore>,
}

impl PayloadCipher {
    /// Creates a cipher reading from the given credentials.
    pub fn new(credentials: Arc<CredentialStore>) -> Self {
        Self { credentials }
    }

    /// Decrypts a resource with the API v3 key.
    pub fn decrypt_resource(&self, resource: &EncryptedResource) -> Result<String, GatewayError> {
        resource.decrypt(self.credentials.api_v3_key()?)
    }

    /// Decrypts raw resource fields with the API v3 key.
    pub fn decrypt(
        &self,
        associated_data: &str,
        nonce: &str,
        ciphertext_b64: &str,
    ) -> Result<String, GatewayError> {
        aead::decrypt(
            self.credentials.api_v3_key()?,
            associated_data,
            nonce,
            ciphertext_b64,
        )
    }

    /// Encrypts a sensitive field with a platform certificate's public key.
    ///
    /// `serial` picks the certificate; without one the only configured
    /// certificate is used.
    pub fn encrypt_sensitive(
        &self,
        plaintext: &str,
        serial: Option<&SerialNumber>,
    ) -> Result<SensitiveField, GatewayError> {
        let certificate = self.credentials.select_platform_certificate(serial)?;
        let ciphertext = oaep::encrypt(certificate.public_key(), plaintext.as_bytes())?;
        Ok(SensitiveField {
            ciphertext,
            platform_serial: certificate.serial().clone(),
        })
    }
}
