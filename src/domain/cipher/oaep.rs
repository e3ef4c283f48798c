//! RSA-OAEP masking of sensitive outbound fields (names, account numbers).
//!
//! Uses SHA-1 with MGF1-SHA-1, the padding the gateway decrypts with.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::rngs::OsRng;
use rsa::{Oaep, RsaPublicKey};
use sha1::Sha1;

use crate::domain::foundation::GatewayError;

/// Encrypts `plaintext` for the holder of `public_key` and base64-encodes it.
///
/// # Errors
///
/// - `Encoding` - plaintext longer than the key allows
/// - `Configuration` - any other RSA failure
pub fn encrypt(public_key: &RsaPublicKey, plaintext: &[u8]) -> Result<String, GatewayError> {
    let ciphertext = public_key
        .encrypt(&mut OsRng, Oaep::new::<Sha1>(), plaintext)
        .map_err(|e| match e {
            rsa::Error::MessageTooLong => {
                GatewayError::encoding("sensitive field too long for RSA-OAEP")
            }
            other => GatewayError::configuration(format!("RSA-OAEP encryption failed: {}", other)),
        })?;
    Ok(STANDARD.encode(ciphertext))
}
