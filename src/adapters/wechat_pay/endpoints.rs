//! Endpoint table for direct-merchant transactions.
//!
//! Every order channel posts to `/v3/pay/transactions/{suffix}` and differs
//! only in its suffix and the fields it requires, so one table row per
//! channel replaces a method per channel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::RequestError;

/// Path prefix shared by all transaction endpoints.
pub const TRANSACTIONS_PATH: &str = "/v3/pay/transactions";

/// Image upload endpoint.
pub const MEDIA_UPLOAD_PATH: &str = "/v3/merchant/media/upload";

/// Video upload endpoint.
pub const MEDIA_VIDEO_UPLOAD_PATH: &str = "/v3/merchant/media/video_upload";

const BASE_FIELDS: &[&str] = &["description", "out_trade_no", "amount", "notify_url"];
const JSAPI_FIELDS: &[&str] = &["description", "out_trade_no", "amount", "notify_url", "payer"];
const H5_FIELDS: &[&str] = &[
    "description",
    "out_trade_no",
    "amount",
    "notify_url",
    "scene_info",
];

/// Client family an order is placed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionChannel {
    /// Official-account browser payments.
    Jsapi,
    /// Mini-program payments; shares the JSAPI endpoint.
    Miniprogram,
    App,
    H5,
    Native,
}

impl TransactionChannel {
    /// Returns every channel.
    pub fn all() -> &'static [TransactionChannel] {
        &[
            TransactionChannel::Jsapi,
            TransactionChannel::Miniprogram,
            TransactionChannel::App,
            TransactionChannel::H5,
            TransactionChannel::Native,
        ]
    }

    /// Returns the endpoint suffix under [`TRANSACTIONS_PATH`].
    pub fn url_suffix(&self) -> &'static str {
        match self {
            TransactionChannel::Jsapi | TransactionChannel::Miniprogram => "jsapi",
            TransactionChannel::App => "app",
            TransactionChannel::H5 => "h5",
            TransactionChannel::Native => "native",
        }
    }

    /// Returns the fields callers must supply.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            TransactionChannel::Jsapi | TransactionChannel::Miniprogram => JSAPI_FIELDS,
            TransactionChannel::H5 => H5_FIELDS,
            TransactionChannel::App | TransactionChannel::Native => BASE_FIELDS,
        }
    }

    /// Returns the full endpoint path.
    pub fn path(&self) -> String {
        format!("{}/{}", TRANSACTIONS_PATH, self.url_suffix())
    }
}

impl fmt::Display for TransactionChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TransactionChannel::Jsapi => "jsapi",
            TransactionChannel::Miniprogram => "miniprogram",
            TransactionChannel::App => "app",
            TransactionChannel::H5 => "h5",
            TransactionChannel::Native => "native",
        };
        f.write_str(name)
    }
}

impl FromStr for TransactionChannel {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jsapi" | "js" => Ok(TransactionChannel::Jsapi),
            "miniprogram" => Ok(TransactionChannel::Miniprogram),
            "app" => Ok(TransactionChannel::App),
            "h5" => Ok(TransactionChannel::H5),
            "native" => Ok(TransactionChannel::Native),
            other => Err(RequestError::InvalidParameters(format!(
                "unknown transaction channel: {}",
                other
            ))),
        }
    }
}

/// How an existing order is identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderIdentifier {
    /// Gateway-assigned transaction id.
    TransactionId(String),
    /// Merchant-assigned order number.
    OutTradeNo(String),
}

impl OrderIdentifier {
    /// Returns the query endpoint path for this identifier.
    ///
    /// # Errors
    ///
    /// - `MissingField` - the identifier is empty
    /// - `InvalidParameters` - it has characters outside the gateway's id alphabet
    pub fn query_path(&self) -> Result<String, RequestError> {
        match self {
            OrderIdentifier::TransactionId(id) => Ok(format!(
                "{}/id/{}",
                TRANSACTIONS_PATH,
                path_segment("transaction_id", id)?
            )),
            OrderIdentifier::OutTradeNo(no) => Ok(format!(
                "{}/out-trade-no/{}",
                TRANSACTIONS_PATH,
                path_segment("out_trade_no", no)?
            )),
        }
    }
}

/// Returns the close endpoint path for a merchant order number.
///
/// # Errors
///
/// Fails like [`OrderIdentifier::query_path`].
pub fn close_path(out_trade_no: &str) -> Result<String, RequestError> {
    Ok(format!(
        "{}/out-trade-no/{}/close",
        TRANSACTIONS_PATH,
        path_segment("out_trade_no", out_trade_no)?
    ))
}

/// Checks an order id against `[0-9A-Za-z_\-|*]` before it goes into a
/// signed path.
fn path_segment<'a>(field: &str, value: &'a str) -> Result<&'a str, RequestError> {
    if value.is_empty() {
        return Err(RequestError::MissingField(field.to_string()));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '|' | '*');
    if let Some(bad) = value.chars().find(|c| !allowed(*c)) {
        return Err(RequestError::InvalidParameters(format!(
            "{} contains {:?}",
            field, bad
        )));
    }
    Ok(value)
}
