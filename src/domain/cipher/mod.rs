//! Cipher module - confidentiality of payloads in both directions.
//!
//! - `aead` - AES-256-GCM unwrap of notification resources
//! - `oaep` - RSA-OAEP masking of sensitive outbound fields
//! - `payload_cipher` - both transforms bound to a `CredentialStore`

pub mod aead;
pub mod oaep;
mod payload_cipher;

pub use aead::{EncryptedResource, AEAD_ALGORITHM, AEAD_NONCE_LEN, AEAD_TAG_LEN};
pub use payload_cipher::{PayloadCipher, SensitiveField};
