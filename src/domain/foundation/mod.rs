//! Foundation module - Shared primitives used across the core.
//!
//! - `errors` - The gateway error taxonomy
//! - `timestamp` - Whole-second Unix timestamps
//! - `nonce` - CSPRNG-backed nonces

mod errors;
mod nonce;
mod timestamp;

pub use errors::GatewayError;
pub use nonce::{Nonce, NONCE_ENTROPY_BYTES};
pub use timestamp::UnixTimestamp;
