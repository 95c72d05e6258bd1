//! Tests for the CSV-backed stores.

use super::*;
use crate::domain::{Deal, DealDraft};
use chrono::{TimeZone, Utc};
use rust_decimal::dec;
use std::fs;
use tempfile::TempDir;

fn test_config(dir: &TempDir) -> CsvStorageConfig {
    CsvStorageConfig {
        data_dir: dir.path().join("data"),
        deals_file: "deals.csv".to_string(),
        clients_file: "clients.csv".to_string(),
    }
}

fn sample_deal(deal_id: &str, notes: &str) -> Deal {
    let draft = DealDraft {
        client_a: "Ivan".to_string(),
        client_b: "Petr".to_string(),
        rub_target: dec!(100000),
        rate_a: dec!(95.5),
        fee_a: dec!(0.015),
        rate_b: dec!(96),
        fee_b: dec!(0.01),
        payout_currency_b: "USDT".to_string(),
        notes: notes.to_string(),
    };
    let at = Utc.with_ymd_and_hms(2025, 1, 15, 14, 35, 1).unwrap();
    Deal::open(deal_id.to_string(), at, draft, dec!(37.171052631579))
}

// ==================== Deal ledger tests ====================

#[tokio::test]
async fn test_ledger_bootstrap_writes_header() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let _ledger = CsvDealLedger::new(&config).unwrap();

    let content = fs::read_to_string(config.data_dir.join("deals.csv")).unwrap();
    let first_line = content.lines().next().unwrap();
    assert_eq!(
        first_line,
        "deal_id,opened_at,client_A,client_B,rub_target,rate_A_rub_per_usd,fee_A_pct,\
         rate_B_rub_per_usd,fee_B_pct,payout_currency_B,status,est_rev_usd,final_rev_usd,notes"
    );
}

#[tokio::test]
async fn test_ledger_bootstrap_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let ledger = CsvDealLedger::new(&config).unwrap();
    ledger.append(&sample_deal("D-20250115-143501", "")).await.unwrap();

    // Re-opening must not rewrite the header or touch existing rows.
    let reopened = CsvDealLedger::new(&config).unwrap();
    let deals = reopened.read_all().await.unwrap();
    assert_eq!(deals.len(), 1);

    let content = fs::read_to_string(config.data_dir.join("deals.csv")).unwrap();
    assert_eq!(content.matches("deal_id").count(), 1);
}

#[tokio::test]
async fn test_ledger_round_trip() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let ledger = CsvDealLedger::new(&config).unwrap();

    let deal = sample_deal("D-20250115-143501", "spot deal");
    ledger.append(&deal).await.unwrap();

    let deals = ledger.read_all().await.unwrap();
    assert_eq!(deals.len(), 1);
    assert_eq!(deals[0], deal);
    assert_eq!(deals[0].rub_target, dec!(100000));
    assert_eq!(deals[0].fee_a_pct, dec!(0.015));
    assert_eq!(deals[0].final_rev_usd, None);
}

#[tokio::test]
async fn test_ledger_quotes_delimiters_in_fields() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let ledger = CsvDealLedger::new(&config).unwrap();

    let mut deal = sample_deal("D-20250115-143501", "called back, confirmed \"tomorrow\"");
    deal.client_a = "Ivanov, Ivan".to_string();
    ledger.append(&deal).await.unwrap();

    let deals = ledger.read_all().await.unwrap();
    assert_eq!(deals[0].client_a, "Ivanov, Ivan");
    assert_eq!(deals[0].notes, "called back, confirmed \"tomorrow\"");
}

#[tokio::test]
async fn test_ledger_decimal_serialization_is_plain() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let ledger = CsvDealLedger::new(&config).unwrap();

    ledger.append(&sample_deal("D-20250115-143501", "")).await.unwrap();

    let content = fs::read_to_string(config.data_dir.join("deals.csv")).unwrap();
    let row = content.lines().nth(1).unwrap();
    assert!(row.contains("95.5"));
    assert!(row.contains("0.015"));
    assert!(row.contains("37.171052631579"));
}

#[tokio::test]
async fn test_ledger_count() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let ledger = CsvDealLedger::new(&config).unwrap();

    assert_eq!(ledger.count().await.unwrap(), 0);
    ledger.append(&sample_deal("D-20250115-143501", "")).await.unwrap();
    ledger.append(&sample_deal("D-20250115-143501-2", "")).await.unwrap();
    assert_eq!(ledger.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_ledger_unavailable_directory_fails() {
    let dir = TempDir::new().unwrap();
    // A file where the data directory should be makes create_dir_all fail.
    let blocker = dir.path().join("data");
    fs::write(&blocker, b"not a directory").unwrap();

    let config = CsvStorageConfig {
        data_dir: blocker,
        deals_file: "deals.csv".to_string(),
        clients_file: "clients.csv".to_string(),
    };

    assert!(CsvDealLedger::new(&config).is_err());
}

// ==================== Client directory tests ====================

#[tokio::test]
async fn test_clients_missing_file_lists_empty() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let directory = CsvClientDirectory::new(&config).unwrap();

    fs::remove_file(config.data_dir.join("clients.csv")).unwrap();
    assert!(directory.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_clients_add_and_list_in_insertion_order() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let directory = CsvClientDirectory::new(&config).unwrap();

    assert!(directory.add_if_new("Ivan").await.unwrap());
    assert!(directory.add_if_new("Petr").await.unwrap());
    assert!(directory.add_if_new("Anna").await.unwrap());

    assert_eq!(directory.list().await.unwrap(), vec!["Ivan", "Petr", "Anna"]);
}

#[tokio::test]
async fn test_clients_add_if_new_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let directory = CsvClientDirectory::new(&config).unwrap();

    assert!(directory.add_if_new("Ivan").await.unwrap());
    assert!(!directory.add_if_new("Ivan").await.unwrap());

    assert_eq!(directory.list().await.unwrap(), vec!["Ivan"]);
}

#[tokio::test]
async fn test_clients_trims_before_storing() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let directory = CsvClientDirectory::new(&config).unwrap();

    assert!(directory.add_if_new("  Ivan  ").await.unwrap());
    assert!(!directory.add_if_new("Ivan").await.unwrap());
    assert_eq!(directory.list().await.unwrap(), vec!["Ivan"]);
}

#[tokio::test]
async fn test_clients_dedup_is_case_sensitive() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let directory = CsvClientDirectory::new(&config).unwrap();

    assert!(directory.add_if_new("Ivan").await.unwrap());
    assert!(directory.add_if_new("ivan").await.unwrap());
    assert_eq!(directory.list().await.unwrap(), vec!["Ivan", "ivan"]);
}

#[tokio::test]
async fn test_clients_empty_name_is_noop() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);
    let directory = CsvClientDirectory::new(&config).unwrap();

    assert!(!directory.add_if_new("   ").await.unwrap());
    assert!(directory.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_clients_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    {
        let directory = CsvClientDirectory::new(&config).unwrap();
        directory.add_if_new("Ivan").await.unwrap();
    }

    let reopened = CsvClientDirectory::new(&config).unwrap();
    assert_eq!(reopened.list().await.unwrap(), vec!["Ivan"]);
}
