//! WeChat Pay v3 gateway adapters.
//!
//! - `client` - table-driven shaping of signed gateway requests
//! - `notification_handler` - webhook intake that records ids after processing
//! - `in_memory_store` - process-local `ProcessedNotificationStore`
//!
//! No HTTP is sent from here; requests come back as [`GatewayRequest`]
//! values for the caller's transport.

mod client;
mod endpoints;
mod error;
mod in_memory_store;
mod notification_handler;

pub use client::{build_query, GatewayClient, GatewayRequest, DEFAULT_BASE_URL};
pub use endpoints::{
    close_path, OrderIdentifier, TransactionChannel, MEDIA_UPLOAD_PATH, MEDIA_VIDEO_UPLOAD_PATH,
    TRANSACTIONS_PATH,
};
pub use error::{NotificationError, RequestError};
pub use in_memory_store::InMemoryProcessedNotificationStore;
pub use notification_handler::{Intake, NotificationAck, NotificationHandler, VerifiedNotification};
