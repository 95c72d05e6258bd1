//! Configuration loading and validation for the deal desk bot.
//!
//! Uses serde_yaml to load YAML configuration files with support for
//! environment variable overrides for sensitive credentials.

mod app;
mod duration;
mod error;
mod storage;
mod telegram;
mod ui;

pub use app::AppConfig;
pub use error::ConfigError;
pub use storage::StorageConfig;
pub use telegram::TelegramConfig;
pub use ui::UiConfig;

use serde::Deserialize;
use std::{env, fs};

/// Root configuration structure for the deal desk bot.
///
/// Required sections: app, telegram. Optional sections: storage, ui.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Application-level settings like name and environment.
    pub app: AppConfig,
    /// Telegram long-polling settings.
    pub telegram: TelegramConfig,
    /// CSV store locations (optional).
    pub storage: Option<StorageConfig>,
    /// Chat UI limits (optional).
    pub ui: Option<UiConfig>,
}

impl Config {
    /// Load configuration from a YAML file at the given path.
    ///
    /// First loads environment variables from `.env` file (if exists),
    /// then loads YAML config and the bot token from `TELEGRAM_BOT_TOKEN`.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        // Load .env file if it exists (ignore error if not found)
        dotenvy::dotenv().ok();

        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        config.load_credentials_from_env();
        config.validate()?;

        Ok(config)
    }

    /// Load credentials from environment variables.
    fn load_credentials_from_env(&mut self) {
        if self.telegram.enabled {
            self.telegram.bot_token = env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        }
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.app.name.is_empty() {
            return Err(ConfigError::Validation("app.name is required".into()));
        }

        let is_production = self.app.env != "development";

        // Only require the token in production/staging
        if self.telegram.enabled && is_production && self.telegram.bot_token.is_empty() {
            return Err(ConfigError::Validation(
                "telegram bot token not found (set TELEGRAM_BOT_TOKEN env var)".into(),
            ));
        }

        if let Some(ref storage) = self.storage {
            if let Some(ref dir) = storage.data_dir {
                if dir.trim().is_empty() {
                    return Err(ConfigError::Validation(
                        "storage.data_dir must not be empty".into(),
                    ));
                }
            }
        }

        if let Some(ref ui) = self.ui {
            if let Some(max) = ui.clients_max_buttons {
                if max == 0 {
                    return Err(ConfigError::Validation(
                        "ui.clients_max_buttons must be positive".into(),
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
