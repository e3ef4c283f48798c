//! WeChat Pay Guard - security core for the WeChat Pay v3 gateway
//!
//! Signs outgoing requests, verifies inbound notifications and protects
//! sensitive payloads in both directions. All operations are synchronous
//! and read from one shared, immutable [`CredentialStore`].

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;

pub use domain::cipher::{EncryptedResource, PayloadCipher, SensitiveField};
pub use domain::credentials::{Certificate, CredentialStore, MerchantPrivateKey, SerialNumber};
pub use domain::foundation::{GatewayError, Nonce, UnixTimestamp};
pub use domain::notification::{Notification, NotificationEnvelope, NotificationVerifier};
pub use domain::signing::{ClientPaymentSigner, RequestSigner, SignedRequest};
