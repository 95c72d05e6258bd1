//! Storage configuration.

use serde::Deserialize;

/// CSV store locations.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory the CSV files live under (default: ./data).
    pub data_dir: Option<String>,
    /// Deal ledger file name (default: deals.csv).
    pub deals_file: Option<String>,
    /// Client directory file name (default: clients.csv).
    pub clients_file: Option<String>,
}
