//! In-memory processed-notification store.
//!
//! Suitable for a single process. Deployments with several webhook
//! receivers need a shared store behind the same port.
//!
//! Ids are never evicted, so the set grows with every notification the
//! process handles. Long-running receivers should use a store that expires
//! ids after the gateway's redelivery window.

use std::collections::HashSet;
use std::sync::RwLock;

use crate::domain::foundation::GatewayError;
use crate::ports::ProcessedNotificationStore;

/// Tracks handled notification ids in a process-local set.
#[derive(Debug, Default)]
pub struct InMemoryProcessedNotificationStore {
    processed: RwLock<HashSet<String>>,
}

impl InMemoryProcessedNotificationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of recorded ids.
    pub fn len(&self) -> Result<usize, GatewayError> {
        Ok(self.processed.read().map_err(|_| poisoned())?.len())
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> Result<bool, GatewayError> {
        Ok(self.len()? == 0)
    }
}

fn poisoned() -> GatewayError {
    GatewayError::configuration("processed notification store lock poisoned")
}

impl ProcessedNotificationStore for InMemoryProcessedNotificationStore {
    fn contains(&self, notification_id: &str) -> Result<bool, GatewayError> {
        let processed = self.processed.read().map_err(|_| poisoned())?;
        Ok(processed.contains(notification_id))
    }

    fn mark_processed(&self, notification_id: &str) -> Result<bool, GatewayError> {
        let mut processed = self.processed.write().map_err(|_| poisoned())?;
        Ok(processed.insert(notification_id.to_string()))
    }
}
