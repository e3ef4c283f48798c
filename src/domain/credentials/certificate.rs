//! Parsed X.509 certificates with a lazily cached serial number.

use std::fmt;

use once_cell::sync::OnceCell;
use rsa::pkcs8::DecodePublicKey;
use rsa::RsaPublicKey;
use x509_cert::der::{DecodePem, Encode};

use super::serial::SerialNumber;
use crate::domain::foundation::GatewayError;

/// An RSA certificate, either the merchant's own or a platform certificate.
pub struct Certificate {
    serial_bytes: Vec<u8>,
    serial: OnceCell<SerialNumber>,
    public_key: RsaPublicKey,
}

impl Certificate {
    /// Parses a PEM-encoded certificate carrying an RSA public key.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Configuration` if the PEM is not a certificate
    /// or its key is not RSA.
    pub fn from_pem(pem: &str) -> Result<Self, GatewayError> {
        let cert = x509_cert::Certificate::from_pem(pem.as_bytes()).map_err(|e| {
            GatewayError::configuration(format!("invalid certificate PEM: {}", e))
        })?;

        let spki_der = cert
            .tbs_certificate
            .subject_public_key_info
            .to_der()
            .map_err(|e| {
                GatewayError::configuration(format!("invalid certificate public key: {}", e))
            })?;
        let public_key = RsaPublicKey::from_public_key_der(&spki_der).map_err(|e| {
            GatewayError::configuration(format!("certificate key is not RSA: {}", e))
        })?;

        Ok(Self {
            serial_bytes: cert.tbs_certificate.serial_number.as_bytes().to_vec(),
            serial: OnceCell::new(),
            public_key,
        })
    }

    /// Returns the serial number, computing it on first access.
    pub fn serial(&self) -> &SerialNumber {
        self.serial
            .get_or_init(|| SerialNumber::from_der_bytes(&self.serial_bytes))
    }

    /// Returns the RSA public key carried by the certificate.
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }
}

impl fmt::Debug for Certificate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Certificate")
            .field("serial", self.serial())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MERCHANT_CERT: &str = include_str!("../../../tests/fixtures/merchant_cert.pem");
    const PLATFORM_CERT: &str = include_str!("../../../tests/fixtures/platform_cert.pem");
    const MERCHANT_KEY: &str = include_str!("../../../tests/fixtures/merchant_key.pem");

    #[test]
    fn parses_merchant_certificate_serial() {
        let cert = Certificate::from_pem(MERCHANT_CERT).unwrap();
        assert_eq!(cert.serial().as_str(), "0254A801C0");
    }

    #[test]
    fn parses_platform_certificate_serial() {
        let cert = Certificate::from_pem(PLATFORM_CERT).unwrap();
        assert_eq!(
            cert.serial().as_str(),
            "5157F09EFDC096DE15EBE81A47057A7232F1B8E1"
        );
    }

    #[test]
    fn serial_is_idempotent() {
        let cert = Certificate::from_pem(PLATFORM_CERT).unwrap();
        let first = cert.serial().clone();
        let second = cert.serial();
        assert_eq!(&first, second);
        assert!(std::ptr::eq(cert.serial(), cert.serial()));
    }

    #[test]
    fn rejects_private_key_pem() {
        let result = Certificate::from_pem(MERCHANT_KEY);
        assert!(matches!(result, Err(GatewayError::Configuration(_))));
    }

    #[test]
    fn rejects_garbage() {
        assert!(Certificate::from_pem("not a certificate").is_err());
    }

    #[test]
    fn debug_shows_serial_only() {
        let cert = Certificate::from_pem(MERCHANT_CERT).unwrap();
        let debug = format!("{:?}", cert);
        assert!(debug.contains("0254A801C0"));
    }
}
