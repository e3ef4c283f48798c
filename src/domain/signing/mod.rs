//! Signing module - everything the merchant signs with its private key.
//!
//! - `canonical` - the exact byte layouts that get signed or verified
//! - `rsa_sha256` - SHA-256 / PKCS#1 v1.5 sign and verify primitives
//! - `request_signer` - `Authorization` headers for outgoing calls
//! - `client_payment` - payment parameters for app, browser and mini-program clients

mod canonical;
mod client_payment;
mod request_signer;
pub mod rsa_sha256;

pub use canonical::CanonicalString;
pub use client_payment::{
    AppPaymentParams, ClientPaymentSigner, JsapiPaymentParams, APP_PACKAGE_VALUE,
    JSAPI_SIGN_TYPE,
};
pub use request_signer::{RequestSigner, SignedRequest, AUTHORIZATION_SCHEME};
