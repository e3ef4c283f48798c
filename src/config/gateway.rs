//! Gateway endpoint configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::adapters::wechat_pay::DEFAULT_BASE_URL;

/// Gateway endpoint configuration
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Gateway origin
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl GatewayConfig {
    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("https://") {
            return Err(ValidationError::GatewayMustBeHttps);
        }
        Ok(())
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
