//! Ports - Interfaces for external collaborators.
//!
//! Ports define the contracts between the security core and the outside
//! world. Adapters implement these ports.
//!
//! ## Webhook Ports
//!
//! - `ProcessedNotificationStore` - Idempotency tracking for gateway callbacks

mod processed_notification_store;

pub use processed_notification_store::ProcessedNotificationStore;
