//! Mapping engine configuration.

use std::path::PathBuf;

/// Mapping engine configuration.
#[derive(Debug, Clone)]
pub struct MappingConfig {
    /// Data directory for the document store
    pub data_dir: PathBuf,
    /// Region used by `format_phone_number` when a number has no country code
    pub default_phone_region: String,
    /// Objective assigned to auto-provisioned campaigns
    pub campaign_objective: String,
    /// Maximum retry attempts for transient I/O errors
    pub persistence_max_retries: u32,
    /// Delay between retry attempts in milliseconds
    pub persistence_retry_delay_ms: u64,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            default_phone_region: "IN".to_string(),
            campaign_objective: "OUTCOME_LEADS".to_string(),
            persistence_max_retries: 3,
            persistence_retry_delay_ms: 100,
        }
    }
}
