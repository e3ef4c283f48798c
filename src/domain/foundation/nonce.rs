//! Random nonces for signed material.
//!
//! Every call to [`Nonce::generate`] draws fresh bytes from the operating
//! system CSPRNG. Nonces are never cached or reused.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;

use super::GatewayError;

/// Bytes of entropy behind a generated nonce.
pub const NONCE_ENTROPY_BYTES: usize = 16;

/// A nonce string embedded in a canonical string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nonce(String);

impl Nonce {
    /// Generates a fresh nonce as 32 lowercase hex characters.
    pub fn generate() -> Self {
        let mut bytes = [0u8; NONCE_ENTROPY_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Wraps an existing nonce, e.g. one received in a notification header.
    ///
    /// Rejects empty values and values containing a newline, which would
    /// shift the fields of the canonical string.
    pub fn parse(value: impl Into<String>) -> Result<Self, GatewayError> {
        let value = value.into();
        if value.is_empty() {
            return Err(GatewayError::encoding("nonce cannot be empty"));
        }
        if value.contains('\n') {
            return Err(GatewayError::encoding("nonce cannot contain a newline"));
        }
        Ok(Self(value))
    }

    /// Returns the nonce text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
