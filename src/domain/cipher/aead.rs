//! AES-256-GCM unwrap of encrypted notification resources.
//!
//! The gateway transmits `base64(ciphertext || tag)` with a 16-byte tag.
//! The key is the 32 raw bytes of the merchant API v3 key.

use aes_gcm::aead::{AeadInPlace, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce, Tag};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::domain::credentials::API_V3_KEY_LEN;
use crate::domain::foundation::GatewayError;

/// Algorithm name carried in encrypted resources.
pub const AEAD_ALGORITHM: &str = "AEAD_AES_256_GCM";

/// Required nonce length in bytes.
pub const AEAD_NONCE_LEN: usize = 12;

/// Authentication tag length in bytes.
pub const AEAD_TAG_LEN: usize = 16;

/// An AEAD-wrapped block as it appears in a notification body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedResource {
    /// Always `AEAD_AES_256_GCM`.
    pub algorithm: String,
    /// Base64 of the ciphertext with the tag appended.
    pub ciphertext: String,
    /// Associated data authenticated alongside the ciphertext.
    #[serde(default)]
    pub associated_data: String,
    /// Object type of the plaintext, e.g. `transaction`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_type: Option<String>,
    /// 12-character nonce.
    pub nonce: String,
}

impl EncryptedResource {
    /// Decrypts the resource with the API v3 key.
    ///
    /// # Errors
    ///
    /// - `Encoding` - unsupported algorithm or malformed fields
    /// - `AuthenticationFailure` - tag check failed
    pub fn decrypt(&self, key: &[u8]) -> Result<String, GatewayError> {
        if self.algorithm != AEAD_ALGORITHM {
            return Err(GatewayError::encoding(format!(
                "unsupported resource algorithm: {}",
                self.algorithm
            )));
        }
        decrypt(key, &self.associated_data, &self.nonce, &self.ciphertext)
    }

    /// Decrypts the resource and parses the plaintext as JSON.
    pub fn decrypt_json(&self, key: &[u8]) -> Result<serde_json::Value, GatewayError> {
        let plaintext = self.decrypt(key)?;
        Ok(serde_json::from_str(&plaintext)?)
    }
}

fn cipher(key: &[u8]) -> Result<Aes256Gcm, GatewayError> {
    if key.len() != API_V3_KEY_LEN {
        return Err(GatewayError::configuration(format!(
            "AEAD key must be {} bytes, got {}",
            API_V3_KEY_LEN,
            key.len()
        )));
    }
    Aes256Gcm::new_from_slice(key)
        .map_err(|e| GatewayError::configuration(format!("invalid AEAD key: {}", e)))
}

fn nonce_bytes(nonce: &str) -> Result<&[u8], GatewayError> {
    let bytes = nonce.as_bytes();
    if bytes.len() != AEAD_NONCE_LEN {
        return Err(GatewayError::encoding(format!(
            "AEAD nonce must be {} bytes, got {}",
            AEAD_NONCE_LEN,
            bytes.len()
        )));
    }
    Ok(bytes)
}

/// Decrypts `base64(ciphertext || tag)` and returns the UTF-8 plaintext.
///
/// Fails closed: on a bad tag nothing of the plaintext is returned.
///
/// # Errors
///
/// - `Configuration` - key is not 32 bytes
/// - `Encoding` - nonce not 12 bytes, bad base64, input shorter than the tag,
///   or plaintext not UTF-8
/// - `AuthenticationFailure` - tag check failed
pub fn decrypt(
    key: &[u8],
    associated_data: &str,
    nonce: &str,
    ciphertext_b64: &str,
) -> Result<String, GatewayError> {
    let cipher = cipher(key)?;
    let nonce = nonce_bytes(nonce)?;

    let mut buffer = STANDARD.decode(ciphertext_b64)?;
    if buffer.len() < AEAD_TAG_LEN {
        return Err(GatewayError::encoding(format!(
            "ciphertext is {} bytes, shorter than the {}-byte tag",
            buffer.len(),
            AEAD_TAG_LEN
        )));
    }
    let tag = buffer.split_off(buffer.len() - AEAD_TAG_LEN);

    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(nonce),
            associated_data.as_bytes(),
            &mut buffer,
            Tag::from_slice(&tag),
        )
        .map_err(|_| {
            tracing::warn!(
                associated_data = %associated_data,
                "AEAD tag verification failed"
            );
            GatewayError::AuthenticationFailure
        })?;

    String::from_utf8(buffer)
        .map_err(|_| GatewayError::encoding("decrypted resource is not UTF-8"))
}

/// Encrypts `plaintext` into `base64(ciphertext || tag)`.
///
/// The gateway performs this direction; it exists here to build resources
/// for tests and local tooling.
pub fn encrypt(
    key: &[u8],
    associated_data: &str,
    nonce: &str,
    plaintext: &str,
) -> Result<String, GatewayError> {
    let cipher = cipher(key)?;
    let nonce = nonce_bytes(nonce)?;

    let mut buffer = plaintext.as_bytes().to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(nonce), associated_data.as_bytes(), &mut buffer)
        .map_err(|_| GatewayError::encoding("plaintext too long for AES-256-GCM"))?;
    buffer.extend_from_slice(&tag);

    Ok(STANDARD.encode(buffer))
}
