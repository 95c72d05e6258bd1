//! Storage interfaces and implementations for persisting deals and clients.

mod flatfile;

pub use flatfile::{CsvClientDirectory, CsvDealLedger, CsvStorageConfig};

use crate::domain::Deal;
use async_trait::async_trait;

/// DealLedger defines the interface for the append-only deal record store.
#[async_trait]
pub trait DealLedger: Send + Sync {
    /// Appends one complete deal row. Either the whole row is committed or
    /// the call fails with nothing written.
    async fn append(&self, deal: &Deal) -> Result<(), StorageError>;

    /// Reads every recorded deal in file order.
    async fn read_all(&self) -> Result<Vec<Deal>, StorageError>;

    /// Returns the number of recorded deals.
    async fn count(&self) -> Result<usize, StorageError>;
}

/// ClientDirectory defines the interface for the known-client name store.
#[async_trait]
pub trait ClientDirectory: Send + Sync {
    /// Returns all recorded client names in insertion order. A missing
    /// backing file reads as an empty list, not an error.
    async fn list(&self) -> Result<Vec<String>, StorageError>;

    /// Appends the trimmed name unless an identical entry already exists
    /// (case-sensitive exact match). Returns true if the name was appended.
    async fn add_if_new(&self, name: &str) -> Result<bool, StorageError>;
}

/// StorageError represents errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("store unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

#[cfg(test)]
mod tests;
