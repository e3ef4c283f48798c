//! Platform certificate configuration

use std::path::PathBuf;

use serde::Deserialize;

/// Locations of the gateway's platform certificates
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlatformConfig {
    /// PEM files (comma-separated); several during a rotation window
    pub certificate_paths: Option<String>,
}

impl PlatformConfig {
    /// Get certificate paths as a vector
    pub fn certificate_paths_list(&self) -> Vec<PathBuf> {
        self.certificate_paths
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default()
    }
}
