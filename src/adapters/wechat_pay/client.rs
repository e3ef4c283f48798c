//! Gateway request shaping.
//!
//! `GatewayClient` turns endpoint parameters into a signed
//! [`GatewayRequest`]: method, absolute URL, path, the exact body text and
//! the headers to send. Dispatching the request is the caller's business.

use std::collections::BTreeMap;
use std::sync::Arc;

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue, Method};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::endpoints::{
    close_path, OrderIdentifier, TransactionChannel, MEDIA_UPLOAD_PATH, MEDIA_VIDEO_UPLOAD_PATH,
};
use super::error::RequestError;
use crate::domain::credentials::CredentialStore;
use crate::domain::notification::SERIAL_HEADER;
use crate::domain::signing::RequestSigner;

/// Production gateway origin.
pub const DEFAULT_BASE_URL: &str = "https://api.mch.weixin.qq.com";

const JSON: &str = "application/json";
const FORM: &str = "application/x-www-form-urlencoded";

/// A signed request ready for the HTTP transport.
#[derive(Debug, Clone)]
pub struct GatewayRequest {
    pub method: Method,
    /// Base URL joined with `path`.
    pub url: String,
    /// Path including the query string; this is what was signed.
    pub path: String,
    /// Exact body text that was signed. For media uploads this is the
    /// `meta` part of the multipart form.
    pub body: String,
    pub headers: HeaderMap,
}

/// Builds signed requests for direct-merchant endpoints.
///
/// # Example
///
/// ```ignore
/// let client = GatewayClient::new(credentials);
/// let request = client.place_order(TransactionChannel::Native, json!({
///     "description": "Image形象店-深圳腾大-QQ公仔",
///     "out_trade_no": "1217752501201407033233368018",
///     "amount": { "total": 100 },
///     "notify_url": "https://example.com/notify",
/// }))?;
/// transport.send(request.method, &request.url, request.headers, request.body);
/// ```
#[derive(Debug, Clone)]
pub struct GatewayClient {
    signer: RequestSigner,
    base_url: String,
    attach_serial: bool,
}

impl GatewayClient {
    /// Creates a client against the production gateway.
    pub fn new(credentials: Arc<CredentialStore>) -> Self {
        Self {
            signer: RequestSigner::new(credentials),
            base_url: DEFAULT_BASE_URL.to_string(),
            attach_serial: false,
        }
    }

    /// Sets a different gateway origin.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Attaches `Wechatpay-Serial` with the merchant certificate serial.
    pub fn with_serial_header(mut self, attach: bool) -> Self {
        self.attach_serial = attach;
        self
    }

    /// Returns the gateway origin.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Signs an arbitrary request carrying a JSON body (empty for none).
    ///
    /// A body-less request is sent as a form request, like
    /// [`query_order`](Self::query_order).
    pub fn request(
        &self,
        method: Method,
        path: &str,
        body: &str,
    ) -> Result<GatewayRequest, RequestError> {
        let content_type = if body.is_empty() { FORM } else { JSON };
        self.build(method, path, body.to_string(), Some(content_type))
    }

    /// Places an order on the given channel.
    ///
    /// `appid` and `mchid` are filled from the credentials; values in
    /// `params` take precedence.
    ///
    /// # Errors
    ///
    /// - `InvalidParameters` - `params` is not a JSON object
    /// - `MissingField` - a field the channel requires is absent or null
    pub fn place_order(
        &self,
        channel: TransactionChannel,
        params: Value,
    ) -> Result<GatewayRequest, RequestError> {
        let params = into_object(params)?;
        require_fields(&params, channel.required_fields())?;

        let credentials = self.signer.credentials();
        let mut payload = Map::new();
        payload.insert("mchid".into(), Value::from(credentials.merchant_id()));
        payload.insert("appid".into(), Value::from(credentials.app_id()));
        payload.extend(params);

        let body = serde_json::to_string(&payload)?;
        tracing::debug!(channel = %channel, "Placing order");
        self.build(Method::POST, &channel.path(), body, Some(JSON))
    }

    /// Queries an order by gateway transaction id or merchant order number.
    pub fn query_order(&self, identifier: &OrderIdentifier) -> Result<GatewayRequest, RequestError> {
        let mut query = BTreeMap::new();
        query.insert("mchid", self.signer.credentials().merchant_id().to_string());
        let path = format!("{}?{}", identifier.query_path()?, build_query(&query));
        self.build(Method::GET, &path, String::new(), Some(FORM))
    }

    /// Closes an unpaid order.
    pub fn close_order(&self, out_trade_no: &str) -> Result<GatewayRequest, RequestError> {
        let path = close_path(out_trade_no)?;
        let mut payload = Map::new();
        payload.insert(
            "mchid".into(),
            Value::from(self.signer.credentials().merchant_id()),
        );
        let body = serde_json::to_string(&payload)?;
        self.build(Method::POST, &path, body, Some(JSON))
    }

    /// Prepares an image upload. The signed body is the `meta` JSON; the
    /// transport sends it together with the file as multipart form data.
    pub fn media_upload(&self, filename: &str, content: &[u8]) -> Result<GatewayRequest, RequestError> {
        self.media(MEDIA_UPLOAD_PATH, filename, content)
    }

    /// Prepares a video upload; see [`media_upload`](Self::media_upload).
    pub fn media_video_upload(
        &self,
        filename: &str,
        content: &[u8],
    ) -> Result<GatewayRequest, RequestError> {
        self.media(MEDIA_VIDEO_UPLOAD_PATH, filename, content)
    }

    fn media(&self, path: &str, filename: &str, content: &[u8]) -> Result<GatewayRequest, RequestError> {
        if filename.is_empty() {
            return Err(RequestError::MissingField("filename".to_string()));
        }
        let meta = serde_json::json!({
            "filename": filename,
            "sha256": hex::encode(Sha256::digest(content)),
        });
        let body = serde_json::to_string(&meta)?;
        // Multipart boundary is chosen by the transport.
        self.build(Method::POST, path, body, None)
    }

    fn build(
        &self,
        method: Method,
        path: &str,
        body: String,
        content_type: Option<&'static str>,
    ) -> Result<GatewayRequest, RequestError> {
        let signed = self.signer.sign_request(&method, path, &body)?;

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&signed.authorization)?);
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        if let Some(content_type) = content_type {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        if self.attach_serial {
            let serial = self.signer.credentials().merchant_serial()?;
            headers.insert(SERIAL_HEADER, HeaderValue::from_str(serial.as_str())?);
        }

        Ok(GatewayRequest {
            url: format!("{}{}", self.base_url, signed.path),
            method: signed.method,
            path: signed.path,
            body: signed.body,
            headers,
        })
    }
}

/// Renders `key=value` pairs joined by `&`, ordered by key.
pub fn build_query<K: AsRef<str>, V: AsRef<str>>(params: &BTreeMap<K, V>) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{}={}", key.as_ref(), value.as_ref()))
        .collect::<Vec<_>>()
        .join("&")
}

fn into_object(params: Value) -> Result<Map<String, Value>, RequestError> {
    match params {
        Value::Object(map) => Ok(map),
        other => Err(RequestError::InvalidParameters(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

fn require_fields(params: &Map<String, Value>, fields: &[&str]) -> Result<(), RequestError> {
    for field in fields {
        match params.get(*field) {
            None | Some(Value::Null) => return Err(RequestError::MissingField(field.to_string())),
            Some(_) => {}
        }
    }
    Ok(())
}
