//! The JSON body of a gateway callback.

use serde::{Deserialize, Serialize};

use crate::domain::cipher::EncryptedResource;
use crate::domain::foundation::GatewayError;

/// A gateway callback body. `resource` holds the encrypted business payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEnvelope {
    pub id: String,
    pub create_time: String,
    pub event_type: String,
    pub resource_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub resource: EncryptedResource,
}

impl NotificationEnvelope {
    /// Parses a callback body.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Encoding` if the body is not a callback envelope.
    pub fn from_json(body: &str) -> Result<Self, GatewayError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Decrypts the resource and parses it as JSON.
    pub fn decrypt_resource(&self, api_v3_key: &[u8]) -> Result<serde_json::Value, GatewayError> {
        self.resource.decrypt_json(api_v3_key)
    }
}
