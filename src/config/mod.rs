//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `WECHAT_PAY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use wechat_pay_guard::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! config.logging.init();
//!
//! let credentials = Arc::new(config.credential_store().expect("Unreadable credentials"));
//! ```

mod error;
mod gateway;
mod logging;
mod merchant;
mod platform;

pub use error::{ConfigError, ValidationError};
pub use gateway::GatewayConfig;
pub use logging::LoggingConfig;
pub use merchant::MerchantConfig;
pub use platform::PlatformConfig;

use std::fs;
use std::path::Path;

use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::domain::credentials::{Certificate, CredentialStore, MerchantPrivateKey};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "WECHAT_PAY";

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Merchant identity and key material
    pub merchant: MerchantConfig,

    /// Platform certificates for notification verification
    #[serde(default)]
    pub platform: PlatformConfig,

    /// Gateway endpoint
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `WECHAT_PAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `WECHAT_PAY__MERCHANT__MCH_ID=1230000109` -> `merchant.mch_id`
    /// - `WECHAT_PAY__PLATFORM__CERTIFICATE_PATHS=a.pem,b.pem` -> `platform.certificate_paths`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or unparseable.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix(ENV_PREFIX)
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.merchant.validate()?;
        self.gateway.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Read the configured PEM files and assemble a `CredentialStore`.
    ///
    /// # Errors
    ///
    /// - `Credentials` - a file cannot be read
    /// - `InvalidCredentials` - a file does not hold a usable key or certificate
    pub fn credential_store(&self) -> Result<CredentialStore, ConfigError> {
        let merchant = &self.merchant;

        let private_key = MerchantPrivateKey::from_pem(&read_pem(&merchant.private_key_path)?)?;
        let certificate = Certificate::from_pem(&read_pem(&merchant.certificate_path)?)?;

        let mut store = CredentialStore::new(merchant.app_id.clone(), merchant.mch_id.clone())
            .with_api_v3_key(merchant.api_v3_key.expose_secret().clone())?
            .with_merchant_private_key(private_key)
            .with_merchant_certificate(certificate);

        for path in self.platform.certificate_paths_list() {
            store.add_platform_certificate(Certificate::from_pem(&read_pem(&path)?)?);
        }

        if store.platform_certificate_count() == 0 {
            tracing::warn!("No platform certificate configured; notifications cannot be verified");
        }

        let merchant_serial = store.merchant_serial()?.clone();
        tracing::info!(
            mch_id = %merchant.mch_id,
            merchant_serial = %merchant_serial,
            platform_certificates = store.platform_certificate_count(),
            "Credentials loaded"
        );

        Ok(store)
    }
}

fn read_pem(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|e| ConfigError::Credentials {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::GatewayError;
    use std::env;
    use std::io::Write;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn fixture(name: &str) -> String {
        format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
    }

    /// Helper to set environment variables for testing
    fn set_minimal_env() {
        env::set_var("WECHAT_PAY__MERCHANT__APP_ID", "wx18802234");
        env::set_var("WECHAT_PAY__MERCHANT__MCH_ID", "16000000");
        env::set_var(
            "WECHAT_PAY__MERCHANT__API_V3_KEY",
            "8934e7d15453e97507ef794cf7b0519d",
        );
        env::set_var("WECHAT_PAY__MERCHANT__PRIVATE_KEY_PATH", fixture("merchant_key.pem"));
        env::set_var("WECHAT_PAY__MERCHANT__CERTIFICATE_PATH", fixture("merchant_cert.pem"));
    }

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for key in [
            "WECHAT_PAY__MERCHANT__APP_ID",
            "WECHAT_PAY__MERCHANT__MCH_ID",
            "WECHAT_PAY__MERCHANT__API_V3_KEY",
            "WECHAT_PAY__MERCHANT__PRIVATE_KEY_PATH",
            "WECHAT_PAY__MERCHANT__CERTIFICATE_PATH",
            "WECHAT_PAY__PLATFORM__CERTIFICATE_PATHS",
            "WECHAT_PAY__GATEWAY__BASE_URL",
            "WECHAT_PAY__LOGGING__LEVEL",
            "WECHAT_PAY__LOGGING__JSON",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.merchant.mch_id, "16000000");
        assert_eq!(config.gateway.base_url, "https://api.mch.weixin.qq.com");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_merchant_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        assert!(matches!(AppConfig::load(), Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn test_overrides() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("WECHAT_PAY__GATEWAY__BASE_URL", "https://api2.mch.weixin.qq.com");
        env::set_var("WECHAT_PAY__LOGGING__LEVEL", "debug");
        env::set_var("WECHAT_PAY__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.gateway.base_url, "https://api2.mch.weixin.qq.com");
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_credential_store_from_files() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var(
            "WECHAT_PAY__PLATFORM__CERTIFICATE_PATHS",
            format!("{},{}", fixture("platform_cert.pem"), fixture("platform_next_cert.pem")),
        );
        let result = AppConfig::load();
        clear_env();

        let store = result.unwrap().credential_store().unwrap();
        assert_eq!(store.merchant_id(), "16000000");
        assert_eq!(store.merchant_serial().unwrap().as_str(), "0254A801C0");
        assert_eq!(store.platform_certificate_count(), 2);
        assert_eq!(store.api_v3_key().unwrap().len(), 32);
    }

    #[test]
    fn test_unreadable_key_file() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("WECHAT_PAY__MERCHANT__PRIVATE_KEY_PATH", "/nonexistent/key.pem");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(
            result.unwrap().credential_store(),
            Err(ConfigError::Credentials { .. })
        ));
    }

    #[test]
    fn test_malformed_certificate_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "-----BEGIN CERTIFICATE-----\nnot a cert\n-----END CERTIFICATE-----").unwrap();

        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        env::set_var("WECHAT_PAY__MERCHANT__CERTIFICATE_PATH", file.path());
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(
            result.unwrap().credential_store(),
            Err(ConfigError::InvalidCredentials(GatewayError::Configuration(_)))
        ));
    }
}
