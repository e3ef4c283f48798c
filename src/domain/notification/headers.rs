//! Notification headers and the parsed notification they describe.

use http::HeaderMap;

use crate::domain::credentials::SerialNumber;
use crate::domain::foundation::{GatewayError, Nonce};

/// Header carrying the gateway's signing timestamp.
pub const TIMESTAMP_HEADER: &str = "wechatpay-timestamp";
/// Header carrying the gateway's nonce.
pub const NONCE_HEADER: &str = "wechatpay-nonce";
/// Header carrying the base64 signature.
pub const SIGNATURE_HEADER: &str = "wechatpay-signature";
/// Header naming the platform certificate that signed the notification.
pub const SERIAL_HEADER: &str = "wechatpay-serial";

/// The signature-related headers of an inbound notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationHeaders {
    /// Seconds since epoch, kept as sent so the canonical string is exact.
    pub timestamp: String,
    pub nonce: Nonce,
    /// Base64 signature.
    pub signature: String,
    pub serial: Option<SerialNumber>,
}

impl NotificationHeaders {
    /// Extracts the notification headers. Names match case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Encoding` if a mandatory header is missing,
    /// not visible ASCII, or malformed.
    pub fn from_header_map(headers: &HeaderMap) -> Result<Self, GatewayError> {
        let timestamp = required(headers, TIMESTAMP_HEADER)?;
        if !timestamp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GatewayError::encoding(format!(
                "{} must be decimal seconds",
                TIMESTAMP_HEADER
            )));
        }

        let nonce = Nonce::parse(required(headers, NONCE_HEADER)?)?;
        let signature = required(headers, SIGNATURE_HEADER)?.to_string();
        let serial = optional(headers, SERIAL_HEADER)?
            .map(SerialNumber::parse)
            .transpose()?;

        Ok(Self {
            timestamp: timestamp.to_string(),
            nonce,
            signature,
            serial,
        })
    }
}

fn optional<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, GatewayError> {
    match headers.get(name) {
        None => Ok(None),
        Some(value) => {
            let value = value
                .to_str()
                .map_err(|_| GatewayError::encoding(format!("{} is not valid ASCII", name)))?
                .trim();
            Ok((!value.is_empty()).then_some(value))
        }
    }
}

fn required<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str, GatewayError> {
    optional(headers, name)?
        .ok_or_else(|| GatewayError::encoding(format!("missing {} header", name)))
}

/// An inbound notification: the signed headers plus the raw body.
///
/// The body must be the exact bytes received; re-serialized JSON will not
/// verify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub timestamp: String,
    pub nonce: Nonce,
    pub raw_body: String,
    pub signature: String,
    pub serial: Option<SerialNumber>,
}

impl Notification {
    /// Combines parsed headers with the raw body.
    pub fn new(headers: NotificationHeaders, raw_body: impl Into<String>) -> Self {
        Self {
            timestamp: headers.timestamp,
            nonce: headers.nonce,
            raw_body: raw_body.into(),
            signature: headers.signature,
            serial: headers.serial,
        }
    }

    /// Parses the headers of an inbound request and attaches its body.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Encoding` if a header is malformed or the
    /// body is not UTF-8.
    pub fn from_header_map(
        headers: &HeaderMap,
        raw_body: impl AsRef<[u8]>,
    ) -> Result<Self, GatewayError> {
        let headers = NotificationHeaders::from_header_map(headers)?;
        let raw_body = std::str::from_utf8(raw_body.as_ref())
            .map_err(|err| GatewayError::encoding(format!("body is not UTF-8: {}", err)))?;
        Ok(Self::new(headers, raw_body))
    }
}
