//! RequestSigner - `Authorization` headers for outgoing gateway calls.

use std::sync::Arc;

use http::Method;

use super::canonical::CanonicalString;
use super::rsa_sha256;
use crate::domain::credentials::CredentialStore;
use crate::domain::foundation::{GatewayError, Nonce, UnixTimestamp};

/// Authentication scheme prefix of the `Authorization` header.
pub const AUTHORIZATION_SCHEME: &str = "WECHATPAY2-SHA256-RSA2048";

/// One signed outgoing request. Built fresh per call.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// HTTP method.
    pub method: Method,
    /// Path including any query string.
    pub path: String,
    /// Signing time.
    pub timestamp: UnixTimestamp,
    /// Per-request nonce.
    pub nonce: Nonce,
    /// Exact body text transmitted (empty for bodiless requests).
    pub body: String,
    /// The signed bytes.
    pub canonical_string: CanonicalString,
    /// Base64 signature over `canonical_string`.
    pub signature: String,
    /// Full `Authorization` header value.
    pub authorization: String,
}

/// Signs outgoing requests with the merchant private key.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Arc<CredentialStore>,
}

impl RequestSigner {
    /// Creates a signer reading from the given credentials.
    pub fn new(credentials: Arc<CredentialStore>) -> Self {
        Self { credentials }
    }

    /// Returns the credentials this signer reads from.
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Signs a request with a fresh timestamp and nonce.
    ///
    /// # Errors
    ///
    /// - `Configuration` - private key or merchant certificate missing
    /// - `Encoding` - path is not an absolute path or contains a newline
    pub fn sign_request(
        &self,
        method: &Method,
        path: &str,
        body: &str,
    ) -> Result<SignedRequest, GatewayError> {
        self.sign_request_at(method, path, body, UnixTimestamp::now(), Nonce::generate())
    }

    /// Signs a request with the given timestamp and nonce.
    pub fn sign_request_at(
        &self,
        method: &Method,
        path: &str,
        body: &str,
        timestamp: UnixTimestamp,
        nonce: Nonce,
    ) -> Result<SignedRequest, GatewayError> {
        if !path.starts_with('/') {
            return Err(GatewayError::encoding(format!(
                "request path must start with '/': {}",
                path
            )));
        }
        if path.contains('\n') {
            return Err(GatewayError::encoding("request path cannot contain a newline"));
        }

        let key = self.credentials.merchant_private_key()?;
        let serial = self.credentials.merchant_serial()?;

        let canonical_string =
            CanonicalString::request(method.as_str(), path, timestamp, &nonce, body);
        let signature = rsa_sha256::sign(key, canonical_string.as_bytes())?;

        let authorization = format!(
            "{} mchid=\"{}\",nonce_str=\"{}\",signature=\"{}\",serial_no=\"{}\",timestamp=\"{}\"",
            AUTHORIZATION_SCHEME,
            self.credentials.merchant_id(),
            nonce,
            signature,
            serial,
            timestamp
        );

        tracing::debug!(
            method = %method,
            path = %path,
            serial_no = %serial,
            body_len = body.len(),
            "Signed gateway request"
        );

        Ok(SignedRequest {
            method: method.clone(),
            path: path.to_string(),
            timestamp,
            nonce,
            body: body.to_string(),
            canonical_string,
            signature,
            authorization,
        })
    }

    /// Returns just the `Authorization` header value for a request.
    pub fn build_authorization_header(
        &self,
        method: &Method,
        path: &str,
        body: &str,
    ) -> Result<String, GatewayError> {
        Ok(self.sign_request(method, path, body)?.authorization)
    }

    /// Signs an arbitrary message with the merchant key.
    pub fn sign_message(&self, message: &str) -> Result<String, GatewayError> {
        rsa_sha256::sign(self.credentials.merchant_private_key()?, message.as_bytes())
    }
}
