//! Canonical strings: the exact bytes that get signed or verified.
//!
//! Every layout is newline-delimited and newline-terminated, including the
//! last line. Field order is fixed per layout.

use std::fmt;

use crate::domain::foundation::{Nonce, UnixTimestamp};

/// A newline-terminated string ready to be signed or verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalString(String);

impl CanonicalString {
    /// Outgoing API call: `METHOD\nPATH\nTIMESTAMP\nNONCE\nBODY\n`.
    ///
    /// `body` is the exact text transmitted, or empty for bodiless requests.
    pub fn request(
        method: &str,
        path_with_query: &str,
        timestamp: UnixTimestamp,
        nonce: &Nonce,
        body: &str,
    ) -> Self {
        Self(format!(
            "{}\n{}\n{}\n{}\n{}\n",
            method, path_with_query, timestamp, nonce, body
        ))
    }

    /// Inbound notification: `TIMESTAMP\nNONCE\nBODY\n`.
    ///
    /// Takes the timestamp as the text received so the bytes match exactly.
    pub fn notification(timestamp: &str, nonce: &Nonce, body: &str) -> Self {
        Self(format!("{}\n{}\n{}\n", timestamp, nonce, body))
    }

    /// In-app SDK payment: `APPID\nTIMESTAMP\nNONCE\nPREPAY_ID\n`.
    pub fn app_payment(
        app_id: &str,
        timestamp: UnixTimestamp,
        nonce: &Nonce,
        prepay_id: &str,
    ) -> Self {
        Self(format!("{}\n{}\n{}\n{}\n", app_id, timestamp, nonce, prepay_id))
    }

    /// Browser / mini-program payment: `APPID\nTIMESTAMP\nNONCE\nprepay_id=PREPAY_ID\n`.
    pub fn jsapi_payment(
        app_id: &str,
        timestamp: UnixTimestamp,
        nonce: &Nonce,
        prepay_id: &str,
    ) -> Self {
        Self(format!(
            "{}\n{}\n{}\nprepay_id={}\n",
            app_id, timestamp, nonce, prepay_id
        ))
    }

    /// Returns the canonical text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the canonical bytes.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Display for CanonicalString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
