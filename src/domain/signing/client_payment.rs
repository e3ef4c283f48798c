//! ClientPaymentSigner - parameters a payer-facing client needs to start
//! payment locally once the merchant holds a `prepay_id`.
//!
//! Client SDKs expect the timestamp as a string, so it is rendered as one.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::canonical::CanonicalString;
use super::rsa_sha256;
use crate::domain::credentials::CredentialStore;
use crate::domain::foundation::{GatewayError, Nonce, UnixTimestamp};

/// Fixed `packageValue` for the in-app SDK.
pub const APP_PACKAGE_VALUE: &str = "Sign=WXPay";

/// `signType` for browser and mini-program payment.
pub const JSAPI_SIGN_TYPE: &str = "RSA";

/// Parameters for the native app SDK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppPaymentParams {
    pub app_id: String,
    pub partner_id: String,
    pub time_stamp: String,
    pub nonce_str: String,
    pub prepay_id: String,
    pub package_value: String,
    pub sign: String,
}

/// Parameters for in-app browsers and mini-programs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsapiPaymentParams {
    pub time_stamp: String,
    pub nonce_str: String,
    pub package: String,
    pub pay_sign: String,
    pub sign_type: String,
}

/// Signs client payment parameters with the merchant private key.
#[derive(Debug, Clone)]
pub struct ClientPaymentSigner {
    credentials: Arc<CredentialStore>,
}

impl ClientPaymentSigner {
    /// Creates a signer reading from the given credentials.
    pub fn new(credentials: Arc<CredentialStore>) -> Self {
        Self { credentials }
    }

    /// In-app SDK parameters with a fresh timestamp and nonce.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Configuration` if the private key is missing.
    pub fn app_payment_params(
        &self,
        app_id: &str,
        prepay_id: &str,
    ) -> Result<AppPaymentParams, GatewayError> {
        self.app_payment_params_at(app_id, prepay_id, UnixTimestamp::now(), Nonce::generate())
    }

    /// In-app SDK parameters for the given timestamp and nonce.
    pub fn app_payment_params_at(
        &self,
        app_id: &str,
        prepay_id: &str,
        timestamp: UnixTimestamp,
        nonce: Nonce,
    ) -> Result<AppPaymentParams, GatewayError> {
        let canonical = CanonicalString::app_payment(app_id, timestamp, &nonce, prepay_id);
        let sign = rsa_sha256::sign(
            self.credentials.merchant_private_key()?,
            canonical.as_bytes(),
        )?;

        Ok(AppPaymentParams {
            app_id: app_id.to_string(),
            partner_id: self.credentials.merchant_id().to_string(),
            time_stamp: timestamp.to_string(),
            nonce_str: nonce.to_string(),
            prepay_id: prepay_id.to_string(),
            package_value: APP_PACKAGE_VALUE.to_string(),
            sign,
        })
    }

    /// Browser / mini-program parameters with a fresh timestamp and nonce.
    pub fn jsapi_payment_params(
        &self,
        app_id: &str,
        prepay_id: &str,
    ) -> Result<JsapiPaymentParams, GatewayError> {
        self.jsapi_payment_params_at(app_id, prepay_id, UnixTimestamp::now(), Nonce::generate())
    }

    /// Browser / mini-program parameters for the given timestamp and nonce.
    pub fn jsapi_payment_params_at(
        &self,
        app_id: &str,
        prepay_id: &str,
        timestamp: UnixTimestamp,
        nonce: Nonce,
    ) -> Result<JsapiPaymentParams, GatewayError> {
        let canonical = CanonicalString::jsapi_payment(app_id, timestamp, &nonce, prepay_id);
        let pay_sign = rsa_sha256::sign(
            self.credentials.merchant_private_key()?,
            canonical.as_bytes(),
        )?;

        Ok(JsapiPaymentParams {
            time_stamp: timestamp.to_string(),
            nonce_str: nonce.to_string(),
            package: format!("prepay_id={}", prepay_id),
            pay_sign,
            sign_type: JSAPI_SIGN_TYPE.to_string(),
        })
    }
}
