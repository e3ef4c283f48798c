//! Whole-second Unix timestamps as carried in signed material.

use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnixTimestamp(i64);

impl UnixTimestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now().timestamp())
    }

    /// Creates a timestamp from raw seconds.
    pub fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Returns the raw seconds.
    pub fn as_secs(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UnixTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
