//! Adapters - Implementations at the edge of the security core.
//!
//! - `wechat_pay` - Gateway request shaping and webhook intake

pub mod wechat_pay;

pub use wechat_pay::{GatewayClient, InMemoryProcessedNotificationStore, NotificationHandler};
