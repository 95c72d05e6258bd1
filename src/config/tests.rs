//! Tests for config module.

use super::*;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

// ==================== Duration parsing tests ====================

#[test]
fn test_parse_duration_seconds() {
    let d = duration::parse_duration("30s").unwrap();
    assert_eq!(d, Duration::from_secs(30));
}

#[test]
fn test_parse_duration_minutes() {
    let d = duration::parse_duration("5m").unwrap();
    assert_eq!(d, Duration::from_secs(300));
}

#[test]
fn test_parse_duration_milliseconds() {
    let d = duration::parse_duration("100ms").unwrap();
    assert_eq!(d, Duration::from_millis(100));
}

#[test]
fn test_parse_duration_empty() {
    let d = duration::parse_duration("").unwrap();
    assert_eq!(d, Duration::ZERO);
}

#[test]
fn test_parse_duration_invalid_unit() {
    let result = duration::parse_duration("10x");
    assert!(result.is_err());
    assert!(result.unwrap_err().contains("unknown duration unit"));
}

// ==================== YAML field loading tests ====================

/// Parse config from YAML string (for testing).
fn from_yaml(yaml: &str) -> Result<Config, ConfigError> {
    let config: Config = serde_yaml::from_str(yaml)?;
    Ok(config)
}

fn minimal_valid_yaml() -> String {
    r#"
app:
  name: testdesk
  env: development

telegram:
  enabled: true
  poll_timeout: 30s
"#
    .to_string()
}

#[test]
fn test_load_app_fields() {
    let yaml = r#"
app:
  name: mydesk
  env: production
  log_level: debug

telegram:
  enabled: false
"#;
    let cfg = from_yaml(yaml).unwrap();

    assert_eq!(cfg.app.name, "mydesk");
    assert_eq!(cfg.app.env, "production");
    assert_eq!(cfg.app.log_level, Some("debug".to_string()));
}

#[test]
fn test_load_telegram_fields() {
    let yaml = r#"
app:
  name: test
  env: dev

telegram:
  enabled: true
  poll_timeout: 25s
"#;
    let cfg = from_yaml(yaml).unwrap();

    assert!(cfg.telegram.enabled);
    assert_eq!(cfg.telegram.poll_timeout, Duration::from_secs(25));
    // Token never comes from YAML.
    assert!(cfg.telegram.bot_token.is_empty());
}

#[test]
fn test_load_storage_fields() {
    let yaml = r#"
app:
  name: test
  env: dev

telegram:
  enabled: false

storage:
  data_dir: ./desk-data
  deals_file: ledger.csv
  clients_file: names.csv
"#;
    let cfg = from_yaml(yaml).unwrap();

    let storage = cfg.storage.unwrap();
    assert_eq!(storage.data_dir, Some("./desk-data".to_string()));
    assert_eq!(storage.deals_file, Some("ledger.csv".to_string()));
    assert_eq!(storage.clients_file, Some("names.csv".to_string()));
}

#[test]
fn test_load_ui_fields() {
    let yaml = r#"
app:
  name: test
  env: dev

telegram:
  enabled: false

ui:
  clients_max_buttons: 12
"#;
    let cfg = from_yaml(yaml).unwrap();

    assert_eq!(cfg.ui.unwrap().clients_max_buttons, Some(12));
}

#[test]
fn test_optional_sections_absent() {
    let cfg = from_yaml(&minimal_valid_yaml()).unwrap();
    assert!(cfg.storage.is_none());
    assert!(cfg.ui.is_none());
}

// ==================== Credentials loading tests ====================

#[test]
fn test_load_credentials_from_env() {
    let mut enabled_cfg = from_yaml(&minimal_valid_yaml()).unwrap();

    let disabled_yaml = r#"
app:
  name: test
  env: dev

telegram:
  enabled: false
"#;
    let mut disabled_cfg = from_yaml(disabled_yaml).unwrap();

    // Set env vars (unsafe because modifying env is not thread-safe)
    unsafe {
        env::set_var("TELEGRAM_BOT_TOKEN", "bot_token_789");
    }

    enabled_cfg.load_credentials_from_env();
    disabled_cfg.load_credentials_from_env();

    assert_eq!(enabled_cfg.telegram.bot_token, "bot_token_789");
    // A disabled dialogue never picks up the token.
    assert!(disabled_cfg.telegram.bot_token.is_empty());

    // Cleanup
    unsafe {
        env::remove_var("TELEGRAM_BOT_TOKEN");
    }
}

// ==================== Validation tests ====================

#[test]
fn test_validate_empty_app_name() {
    let yaml = r#"
app:
  name: ""
  env: dev

telegram:
  enabled: false
"#;
    let cfg = from_yaml(yaml).unwrap();

    let result = cfg.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("app.name is required"));
}

#[test]
fn test_validate_missing_token_in_production() {
    let yaml = r#"
app:
  name: test
  env: production

telegram:
  enabled: true
"#;
    let cfg = from_yaml(yaml).unwrap();

    let result = cfg.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("telegram bot token not found"));
}

#[test]
fn test_validate_skip_token_in_development() {
    let cfg = from_yaml(&minimal_valid_yaml()).unwrap();

    let result = cfg.validate();
    assert!(
        result.is_ok(),
        "Expected validation to pass in development mode without a token"
    );
}

#[test]
fn test_validate_empty_data_dir() {
    let yaml = r#"
app:
  name: test
  env: dev

telegram:
  enabled: false

storage:
  data_dir: "  "
"#;
    let cfg = from_yaml(yaml).unwrap();

    let result = cfg.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("storage.data_dir must not be empty"));
}

#[test]
fn test_validate_zero_max_buttons() {
    let yaml = r#"
app:
  name: test
  env: dev

telegram:
  enabled: false

ui:
  clients_max_buttons: 0
"#;
    let cfg = from_yaml(yaml).unwrap();

    let result = cfg.validate();
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("clients_max_buttons must be positive"));
}

// ==================== File loading tests ====================

#[test]
fn test_load_from_file_development() {
    // In development mode, the bot token is not required
    let yaml = minimal_valid_yaml();

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let cfg = Config::load(file.path().to_str().unwrap()).unwrap();

    assert_eq!(cfg.app.name, "testdesk");
    assert_eq!(cfg.app.env, "development");
    assert!(cfg.telegram.enabled);
}

#[test]
fn test_load_file_not_found() {
    let result = Config::load("nonexistent_config.yaml");
    assert!(result.is_err());
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("failed to read config file"));
}
