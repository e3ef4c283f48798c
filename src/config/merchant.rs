//! Merchant identity configuration

use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::credentials::API_V3_KEY_LEN;

/// Merchant identity and key material locations
#[derive(Debug, Clone, Deserialize)]
pub struct MerchantConfig {
    /// Application id bound to the merchant (appid)
    pub app_id: String,

    /// Merchant id (mchid)
    pub mch_id: String,

    /// API v3 key used for AEAD resource decryption
    pub api_v3_key: SecretString,

    /// PEM file holding the merchant private key
    pub private_key_path: PathBuf,

    /// PEM file holding the merchant certificate
    pub certificate_path: PathBuf,
}

impl MerchantConfig {
    /// Validate merchant configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.app_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("MERCHANT__APP_ID"));
        }
        if self.mch_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("MERCHANT__MCH_ID"));
        }

        let key_len = self.api_v3_key.expose_secret().len();
        if key_len == 0 {
            return Err(ValidationError::MissingRequired("MERCHANT__API_V3_KEY"));
        }
        if key_len != API_V3_KEY_LEN {
            return Err(ValidationError::InvalidApiV3KeyLength(key_len));
        }

        if self.private_key_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("MERCHANT__PRIVATE_KEY_PATH"));
        }
        if self.certificate_path.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("MERCHANT__CERTIFICATE_PATH"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> MerchantConfig {
        MerchantConfig {
            app_id: "wx18802234".to_string(),
            mch_id: "16000000".to_string(),
            api_v3_key: SecretString::new("8934e7d15453e97507ef794cf7b0519d".to_string()),
            private_key_path: PathBuf::from("apiclient_key.pem"),
            certificate_path: PathBuf::from("apiclient_cert.pem"),
        }
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_mch_id() {
        let config = MerchantConfig {
            mch_id: " ".to_string(),
            ..valid()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::MissingRequired("MERCHANT__MCH_ID"))
        );
    }

    #[test]
    fn test_validation_short_api_key() {
        let config = MerchantConfig {
            api_v3_key: SecretString::new("too-short".to_string()),
            ..valid()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidApiV3KeyLength(9)));
    }

    #[test]
    fn test_validation_missing_key_path() {
        let config = MerchantConfig {
            private_key_path: PathBuf::new(),
            ..valid()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let rendered = format!("{:?}", valid());
        assert!(!rendered.contains("8934e7d15453e97507ef794cf7b0519d"));
    }
}
