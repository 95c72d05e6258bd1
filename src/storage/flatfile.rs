//! CSV flat-file implementation of the deal ledger and client directory.

use crate::domain::Deal;
use crate::storage::{ClientDirectory, DealLedger, StorageError};
use async_trait::async_trait;
use csv::{ReaderBuilder, WriterBuilder};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Column order of the deal ledger. Must stay identical across all rows.
const DEAL_HEADER: [&str; 14] = [
    "deal_id",
    "opened_at",
    "client_A",
    "client_B",
    "rub_target",
    "rate_A_rub_per_usd",
    "fee_A_pct",
    "rate_B_rub_per_usd",
    "fee_B_pct",
    "payout_currency_B",
    "status",
    "est_rev_usd",
    "final_rev_usd",
    "notes",
];

const CLIENT_HEADER: [&str; 1] = ["client_name"];

/// CsvStorageConfig holds the locations of the backing CSV files.
#[derive(Debug, Clone)]
pub struct CsvStorageConfig {
    /// Directory the CSV files live under; created on first access.
    pub data_dir: PathBuf,
    /// Deal ledger file name.
    pub deals_file: String,
    /// Client directory file name.
    pub clients_file: String,
}

impl Default for CsvStorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            deals_file: "deals.csv".to_string(),
            clients_file: "clients.csv".to_string(),
        }
    }
}

/// Creates the data directory and writes the header row, once, if the file
/// does not exist yet.
fn ensure_header(dir: &Path, path: &Path, header: &[&str]) -> Result<(), StorageError> {
    fs::create_dir_all(dir)?;

    if path.exists() {
        return Ok(());
    }

    let mut writer = WriterBuilder::new().from_path(path)?;
    writer.write_record(header)?;
    writer.flush()?;
    Ok(())
}

/// CsvDealLedger implements DealLedger on one append-only CSV file.
///
/// Appends are serialized by an internal mutex so that concurrent chat
/// dialogues cannot interleave rows.
pub struct CsvDealLedger {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvDealLedger {
    /// Opens the ledger, bootstrapping the data directory and header row on
    /// first access.
    pub fn new(config: &CsvStorageConfig) -> Result<Self, StorageError> {
        let path = config.data_dir.join(&config.deals_file);
        ensure_header(&config.data_dir, &path, &DEAL_HEADER)?;

        info!(path = %path.display(), "Deal ledger ready");
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }
}

#[async_trait]
impl DealLedger for CsvDealLedger {
    async fn append(&self, deal: &Deal) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.serialize(deal)?;
        writer.flush()?;

        debug!(deal_id = %deal.deal_id, "Deal appended");
        Ok(())
    }

    async fn read_all(&self) -> Result<Vec<Deal>, StorageError> {
        let _guard = self.lock.lock().await;
        read_deals(&self.path)
    }

    async fn count(&self) -> Result<usize, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(read_deals(&self.path)?.len())
    }
}

fn read_deals(path: &Path) -> Result<Vec<Deal>, StorageError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut deals = Vec::new();
    for row in reader.deserialize() {
        let deal: Deal = row?;
        deals.push(deal);
    }
    Ok(deals)
}

/// CsvClientDirectory implements ClientDirectory on one single-column CSV
/// file. The read-before-append dedup runs under the same mutex as the
/// append itself.
pub struct CsvClientDirectory {
    path: PathBuf,
    lock: Mutex<()>,
}

impl CsvClientDirectory {
    /// Opens the directory, bootstrapping the data directory and header row
    /// on first access.
    pub fn new(config: &CsvStorageConfig) -> Result<Self, StorageError> {
        let path = config.data_dir.join(&config.clients_file);
        ensure_header(&config.data_dir, &path, &CLIENT_HEADER)?;

        info!(path = %path.display(), "Client directory ready");
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }
}

#[async_trait]
impl ClientDirectory for CsvClientDirectory {
    async fn list(&self) -> Result<Vec<String>, StorageError> {
        let _guard = self.lock.lock().await;
        read_clients(&self.path)
    }

    async fn add_if_new(&self, name: &str) -> Result<bool, StorageError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }

        let _guard = self.lock.lock().await;

        let known = read_clients(&self.path)?;
        if known.iter().any(|existing| existing == name) {
            return Ok(false);
        }

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        writer.write_record([name])?;
        writer.flush()?;

        debug!(client = %name, "Client recorded");
        Ok(true)
    }
}

fn read_clients(path: &Path) -> Result<Vec<String>, StorageError> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut names = Vec::new();
    for row in reader.records() {
        let record = row?;
        if let Some(name) = record.get(0) {
            if !name.is_empty() {
                names.push(name.to_string());
            }
        }
    }
    Ok(names)
}
