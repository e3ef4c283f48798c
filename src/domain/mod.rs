//! Domain layer: the security core of the gateway integration.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (errors, timestamps, nonces)
//! - `credentials` - Merchant key, certificates and the credential store
//! - `signing` - Canonical strings, request and client-payment signatures
//! - `notification` - Inbound callback verification and envelope parsing
//! - `cipher` - AEAD resource decryption and RSA-OAEP field encryption

pub mod cipher;
pub mod credentials;
pub mod foundation;
pub mod notification;
pub mod signing;
