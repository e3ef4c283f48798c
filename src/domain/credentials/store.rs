//! CredentialStore - the cryptographic identities of one merchant.
//!
//! Built once before concurrent use, then shared read-only (typically behind
//! an `Arc`). The only interior mutability is each certificate's one-time
//! serial cache.

use std::collections::BTreeMap;
use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use super::certificate::Certificate;
use super::private_key::MerchantPrivateKey;
use super::serial::SerialNumber;
use crate::domain::foundation::GatewayError;

/// Required length of the API v3 key in raw bytes.
pub const API_V3_KEY_LEN: usize = 32;

/// Credentials for one merchant identity.
pub struct CredentialStore {
    app_id: String,
    merchant_id: String,
    api_v3_key: Option<SecretString>,
    merchant_private_key: Option<MerchantPrivateKey>,
    merchant_certificate: Option<Certificate>,
    platform_certificates: BTreeMap<SerialNumber, Certificate>,
}

impl CredentialStore {
    /// Creates a store for the given application and merchant identifiers.
    pub fn new(app_id: impl Into<String>, merchant_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            merchant_id: merchant_id.into(),
            api_v3_key: None,
            merchant_private_key: None,
            merchant_certificate: None,
            platform_certificates: BTreeMap::new(),
        }
    }

    /// Sets the symmetric API v3 key.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Configuration` unless the key is exactly 32 bytes.
    pub fn with_api_v3_key(mut self, key: impl Into<String>) -> Result<Self, GatewayError> {
        let key = key.into();
        if key.len() != API_V3_KEY_LEN {
            return Err(GatewayError::configuration(format!(
                "API v3 key must be {} bytes, got {}",
                API_V3_KEY_LEN,
                key.len()
            )));
        }
        self.api_v3_key = Some(SecretString::new(key));
        Ok(self)
    }

    /// Sets the merchant private key.
    pub fn with_merchant_private_key(mut self, key: MerchantPrivateKey) -> Self {
        self.merchant_private_key = Some(key);
        self
    }

    /// Sets the merchant certificate (public counterpart of the private key).
    ///
    /// The pairing is not checked; callers supply consistent credentials.
    pub fn with_merchant_certificate(mut self, certificate: Certificate) -> Self {
        self.merchant_certificate = Some(certificate);
        self
    }

    /// Adds a platform certificate.
    pub fn with_platform_certificate(mut self, certificate: Certificate) -> Self {
        self.add_platform_certificate(certificate);
        self
    }

    /// Adds a platform certificate, replacing one with the same serial.
    ///
    /// Several certificates may be active at once during a rotation window.
    pub fn add_platform_certificate(&mut self, certificate: Certificate) {
        let serial = certificate.serial().clone();
        tracing::debug!(serial = %serial, "Registered platform certificate");
        self.platform_certificates.insert(serial, certificate);
    }

    /// Returns the application id.
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    /// Returns the merchant id (`mchid`).
    pub fn merchant_id(&self) -> &str {
        &self.merchant_id
    }

    /// Returns the raw API v3 key bytes.
    pub fn api_v3_key(&self) -> Result<&[u8], GatewayError> {
        self.api_v3_key
            .as_ref()
            .map(|key| key.expose_secret().as_bytes())
            .ok_or_else(|| GatewayError::configuration("API v3 key is not configured"))
    }

    /// Returns the merchant private key.
    pub fn merchant_private_key(&self) -> Result<&MerchantPrivateKey, GatewayError> {
        self.merchant_private_key
            .as_ref()
            .ok_or_else(|| GatewayError::configuration("merchant private key is not configured"))
    }

    /// Returns the merchant certificate.
    pub fn merchant_certificate(&self) -> Result<&Certificate, GatewayError> {
        self.merchant_certificate
            .as_ref()
            .ok_or_else(|| GatewayError::configuration("merchant certificate is not configured"))
    }

    /// Returns the merchant certificate serial, the value of `serial_no` and
    /// of the `Wechatpay-Serial` request header.
    pub fn merchant_serial(&self) -> Result<&SerialNumber, GatewayError> {
        Ok(self.merchant_certificate()?.serial())
    }

    /// Returns the serial of any certificate, cached on the certificate.
    pub fn serial_of<'a>(&self, certificate: &'a Certificate) -> &'a SerialNumber {
        certificate.serial()
    }

    /// Looks up a platform certificate by serial.
    pub fn platform_certificate(&self, serial: &SerialNumber) -> Option<&Certificate> {
        self.platform_certificates.get(serial)
    }

    /// Returns the serials of all platform certificates, in ascending order.
    pub fn platform_serials(&self) -> Vec<&SerialNumber> {
        self.platform_certificates.keys().collect()
    }

    /// Returns the number of platform certificates held.
    pub fn platform_certificate_count(&self) -> usize {
        self.platform_certificates.len()
    }

    /// Selects the platform certificate to verify or encrypt with.
    ///
    /// A known serial selects its certificate. Without a usable serial the
    /// only configured certificate is used; with several configured the
    /// choice would be a guess, so it fails.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Configuration` if no certificate can be chosen.
    pub fn select_platform_certificate(
        &self,
        serial: Option<&SerialNumber>,
    ) -> Result<&Certificate, GatewayError> {
        if let Some(serial) = serial {
            if let Some(certificate) = self.platform_certificates.get(serial) {
                return Ok(certificate);
            }
        }

        let mut certificates = self.platform_certificates.values();
        match (certificates.next(), certificates.next()) {
            (Some(only), None) => {
                if let Some(serial) = serial {
                    tracing::warn!(
                        requested = %serial,
                        configured = %only.serial(),
                        "Unknown platform serial, falling back to the only configured certificate"
                    );
                }
                Ok(only)
            }
            (None, _) => Err(GatewayError::configuration(
                "no platform certificate is configured",
            )),
            (Some(_), Some(_)) => match serial {
                Some(serial) => Err(GatewayError::configuration(format!(
                    "no platform certificate with serial {}",
                    serial
                ))),
                None => Err(GatewayError::configuration(
                    "several platform certificates are configured but no serial was given",
                )),
            },
        }
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("app_id", &self.app_id)
            .field("merchant_id", &self.merchant_id)
            .field("api_v3_key", &self.api_v3_key.as_ref().map(|_| "[REDACTED]"))
            .field("merchant_private_key", &self.merchant_private_key)
            .field("merchant_certificate", &self.merchant_certificate)
            .field("platform_serials", &self.platform_serials())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MERCHANT_KEY: &str = include_str!("../../../tests/fixtures/merchant_key.pem");
    const MERCHANT_CERT: &str = include_str!("../../../tests/fixtures/merchant_cert.pem");
    const PLATFORM_CERT: &str = include_str!("../../../tests/fixtures/platform_cert.pem");
    const PLATFORM_NEXT_CERT: &str =
        include_str!("../../../tests/fixtures/platform_next_cert.pem");

    const API_KEY: &str = "8934e7d15453e97507ef794cf7b0519d";

    fn platform(pem: &str) -> Certificate {
        Certificate::from_pem(pem).unwrap()
    }

    fn serial(value: &str) -> SerialNumber {
        SerialNumber::parse(value).unwrap()
    }

    // ══════════════════════════════════════════════════════════════
    // Construction Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn exposes_identifiers() {
        let store = CredentialStore::new("wxd930ea5d5a258f4f", "16000000");
        assert_eq!(store.app_id(), "wxd930ea5d5a258f4f");
        assert_eq!(store.merchant_id(), "16000000");
    }

    #[test]
    fn accepts_32_byte_api_key() {
        let store = CredentialStore::new("app", "mch")
            .with_api_v3_key(API_KEY)
            .unwrap();
        assert_eq!(store.api_v3_key().unwrap(), API_KEY.as_bytes());
    }

    #[test]
    fn rejects_api_key_of_wrong_length() {
        let result = CredentialStore::new("app", "mch").with_api_v3_key("too-short");
        assert!(matches!(result, Err(GatewayError::Configuration(_))));
    }

    #[test]
    fn missing_material_is_a_configuration_error() {
        let store = CredentialStore::new("app", "mch");
        assert!(matches!(store.api_v3_key(), Err(GatewayError::Configuration(_))));
        assert!(matches!(
            store.merchant_private_key(),
            Err(GatewayError::Configuration(_))
        ));
        assert!(matches!(store.merchant_serial(), Err(GatewayError::Configuration(_))));
    }

    #[test]
    fn merchant_serial_comes_from_certificate() {
        let store = CredentialStore::new("app", "mch")
            .with_merchant_private_key(MerchantPrivateKey::from_pem(MERCHANT_KEY).unwrap())
            .with_merchant_certificate(Certificate::from_pem(MERCHANT_CERT).unwrap());
        assert_eq!(store.merchant_serial().unwrap().as_str(), "0254A801C0");
    }

    #[test]
    fn serial_of_matches_certificate_serial() {
        let store = CredentialStore::new("app", "mch");
        let cert = platform(PLATFORM_CERT);
        let a = store.serial_of(&cert).clone();
        let b = store.serial_of(&cert).clone();
        assert_eq!(a, b);
        assert_eq!(a, *cert.serial());
    }

    #[test]
    fn debug_redacts_api_key() {
        let store = CredentialStore::new("app", "mch")
            .with_api_v3_key(API_KEY)
            .unwrap();
        let debug = format!("{:?}", store);
        assert!(!debug.contains(API_KEY));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn store_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CredentialStore>();
    }

    // ══════════════════════════════════════════════════════════════
    // Platform Certificate Selection Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn holds_several_platform_certificates() {
        let store = CredentialStore::new("app", "mch")
            .with_platform_certificate(platform(PLATFORM_CERT))
            .with_platform_certificate(platform(PLATFORM_NEXT_CERT));
        assert_eq!(store.platform_certificate_count(), 2);
        let serials: Vec<&str> = store.platform_serials().iter().map(|s| s.as_str()).collect();
        assert_eq!(
            serials,
            vec![
                "5157F09EFDC096DE15EBE81A47057A7232F1B8E1",
                "7A3F10C2B4D8E6F1A2B3C4D5E6F708192A3B4C5D"
            ]
        );
    }

    #[test]
    fn adding_same_serial_replaces() {
        let mut store = CredentialStore::new("app", "mch");
        store.add_platform_certificate(platform(PLATFORM_CERT));
        store.add_platform_certificate(platform(PLATFORM_CERT));
        assert_eq!(store.platform_certificate_count(), 1);
    }

    #[test]
    fn selects_by_serial_case_insensitively() {
        let store = CredentialStore::new("app", "mch")
            .with_platform_certificate(platform(PLATFORM_CERT))
            .with_platform_certificate(platform(PLATFORM_NEXT_CERT));
        let wanted = serial("7a3f10c2b4d8e6f1a2b3c4d5e6f708192a3b4c5d");
        let selected = store.select_platform_certificate(Some(&wanted)).unwrap();
        assert_eq!(selected.serial(), &wanted);
    }

    #[test]
    fn falls_back_to_single_certificate_without_serial() {
        let store = CredentialStore::new("app", "mch")
            .with_platform_certificate(platform(PLATFORM_CERT));
        let selected = store.select_platform_certificate(None).unwrap();
        assert_eq!(
            selected.serial().as_str(),
            "5157F09EFDC096DE15EBE81A47057A7232F1B8E1"
        );
    }

    #[test]
    fn falls_back_to_single_certificate_with_unknown_serial() {
        let store = CredentialStore::new("app", "mch")
            .with_platform_certificate(platform(PLATFORM_CERT));
        let unknown = serial("ABCDEF");
        assert!(store.select_platform_certificate(Some(&unknown)).is_ok());
    }

    #[test]
    fn refuses_to_guess_among_several() {
        let store = CredentialStore::new("app", "mch")
            .with_platform_certificate(platform(PLATFORM_CERT))
            .with_platform_certificate(platform(PLATFORM_NEXT_CERT));
        assert!(matches!(
            store.select_platform_certificate(None),
            Err(GatewayError::Configuration(_))
        ));
        let unknown = serial("ABCDEF");
        assert!(matches!(
            store.select_platform_certificate(Some(&unknown)),
            Err(GatewayError::Configuration(_))
        ));
    }

    #[test]
    fn no_platform_certificate_is_a_configuration_error() {
        let store = CredentialStore::new("app", "mch");
        assert!(matches!(
            store.select_platform_certificate(None),
            Err(GatewayError::Configuration(_))
        ));
    }
}
