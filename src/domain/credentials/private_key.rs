//! The merchant's RSA private key.

use std::fmt;

use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::traits::PublicKeyParts;
use rsa::RsaPrivateKey;

use crate::domain::foundation::GatewayError;

/// Smallest modulus the gateway accepts.
pub const MIN_KEY_BITS: usize = 2048;

/// RSA private key used to sign outgoing requests and client payment params.
#[derive(Clone)]
pub struct MerchantPrivateKey(RsaPrivateKey);

impl MerchantPrivateKey {
    /// Parses a PEM private key in PKCS#8 (`BEGIN PRIVATE KEY`) or PKCS#1
    /// (`BEGIN RSA PRIVATE KEY`) form.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Configuration` for malformed PEM or keys
    /// shorter than 2048 bits.
    pub fn from_pem(pem: &str) -> Result<Self, GatewayError> {
        let key = RsaPrivateKey::from_pkcs8_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
            .map_err(|e| {
                GatewayError::configuration(format!("invalid merchant private key: {}", e))
            })?;
        Self::from_key(key)
    }

    /// Wraps an already parsed key.
    pub fn from_key(key: RsaPrivateKey) -> Result<Self, GatewayError> {
        let bits = key.size() * 8;
        if bits < MIN_KEY_BITS {
            return Err(GatewayError::configuration(format!(
                "merchant private key is {} bits, at least {} required",
                bits, MIN_KEY_BITS
            )));
        }
        Ok(Self(key))
    }

    /// Returns the underlying key.
    pub fn as_rsa(&self) -> &RsaPrivateKey {
        &self.0
    }
}

impl fmt::Debug for MerchantPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MerchantPrivateKey({} bits, [REDACTED])", self.0.size() * 8)
    }
}
