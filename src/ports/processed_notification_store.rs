//! ProcessedNotificationStore port - Idempotency for gateway callbacks.
//!
//! The gateway redelivers a notification until it receives a success
//! response, so the same notification id can arrive several times. The
//! webhook intake records handled ids here and acknowledges repeats
//! without processing them again.

use crate::domain::foundation::GatewayError;

/// Port for tracking which notification ids have been handled.
///
/// # Example
///
/// ```ignore
/// if store.contains(&envelope.id)? {
///     return Ok(Intake::Duplicate { id: envelope.id });
/// }
///
/// // Decrypt and hand off...
///
/// store.mark_processed(&envelope.id)?;
/// ```
pub trait ProcessedNotificationStore: Send + Sync {
    /// Returns `true` if the notification id was already handled.
    fn contains(&self, notification_id: &str) -> Result<bool, GatewayError>;

    /// Records a notification id as handled.
    ///
    /// Returns `false` if it was already recorded.
    fn mark_processed(&self, notification_id: &str) -> Result<bool, GatewayError>;
}
