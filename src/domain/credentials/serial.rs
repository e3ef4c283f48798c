//! Certificate serial numbers rendered the way the gateway expects them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::GatewayError;

/// Uppercase hex rendering of an X.509 serial number.
///
/// Leading zero bytes of the DER integer are dropped, every remaining byte
/// becomes two hex digits. A zero serial renders as `"0"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SerialNumber(String);

impl SerialNumber {
    /// Renders the big-endian content bytes of a DER-encoded serial.
    pub fn from_der_bytes(bytes: &[u8]) -> Self {
        let significant = match bytes.iter().position(|b| *b != 0) {
            Some(start) => &bytes[start..],
            None => return Self("0".to_string()),
        };
        Self(hex::encode_upper(significant))
    }

    /// Parses a serial received as text, e.g. from a `Wechatpay-Serial` header.
    ///
    /// Hex digits are normalized to uppercase so lookups are case-insensitive.
    pub fn parse(value: &str) -> Result<Self, GatewayError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(GatewayError::encoding("serial number cannot be empty"));
        }
        if !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(GatewayError::encoding(format!(
                "serial number is not hex: {}",
                trimmed
            )));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the hex text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
