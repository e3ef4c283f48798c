//! Notification module - trusting inbound gateway callbacks.
//!
//! - `headers` - the `Wechatpay-*` signature headers
//! - `verifier` - signature verification against platform certificates
//! - `envelope` - the callback body and its encrypted resource

mod envelope;
mod headers;
mod verifier;

pub use envelope::NotificationEnvelope;
pub use headers::{
    Notification, NotificationHeaders, NONCE_HEADER, SERIAL_HEADER, SIGNATURE_HEADER,
    TIMESTAMP_HEADER,
};
pub use verifier::NotificationVerifier;
