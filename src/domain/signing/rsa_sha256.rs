//! SHA-256 / PKCS#1 v1.5 signatures encoded as standard base64.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rsa::{Pkcs1v15Sign, RsaPublicKey};
use sha2::{Digest, Sha256};

use crate::domain::credentials::MerchantPrivateKey;
use crate::domain::foundation::GatewayError;

/// Signs `message` and returns the base64 signature (no line wraps).
///
/// # Errors
///
/// Returns `GatewayError::Configuration` if the key cannot produce a signature.
pub fn sign(key: &MerchantPrivateKey, message: &[u8]) -> Result<String, GatewayError> {
    let digest = Sha256::digest(message);
    let signature = key
        .as_rsa()
        .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
        .map_err(|e| GatewayError::configuration(format!("RSA signing failed: {}", e)))?;
    Ok(STANDARD.encode(signature))
}

/// Verifies a base64 signature over `message`.
///
/// A well-formed signature that does not match yields `Ok(false)`.
///
/// # Errors
///
/// Returns `GatewayError::Encoding` if `signature_b64` is not valid base64.
pub fn verify(
    public_key: &RsaPublicKey,
    message: &[u8],
    signature_b64: &str,
) -> Result<bool, GatewayError> {
    let signature = STANDARD.decode(signature_b64.trim())?;
    let digest = Sha256::digest(message);
    Ok(public_key
        .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, &signature)
        .is_ok())
}
