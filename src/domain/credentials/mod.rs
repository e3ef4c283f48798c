//! Credentials module - merchant and platform key material.
//!
//! - `store` - `CredentialStore`, the per-merchant holder of all secrets
//! - `certificate` - parsed X.509 certificates with cached serials
//! - `private_key` - the merchant RSA private key
//! - `serial` - serial number rendering and parsing

mod certificate;
mod private_key;
mod serial;
mod store;

pub use certificate::Certificate;
pub use private_key::{MerchantPrivateKey, MIN_KEY_BITS};
pub use serial::SerialNumber;
pub use store::{CredentialStore, API_V3_KEY_LEN};
