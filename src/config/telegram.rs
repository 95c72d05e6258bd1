//! Telegram dialogue configuration.

use serde::Deserialize;
use std::time::Duration;

use super::duration;

/// Telegram long-polling settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Whether the Telegram dialogue is active.
    #[serde(default)]
    pub enabled: bool,
    /// Bot token (loaded from TELEGRAM_BOT_TOKEN env var, never from YAML).
    #[serde(skip)]
    pub bot_token: String,
    /// getUpdates long-poll timeout (default: 30s).
    #[serde(default, with = "duration")]
    pub poll_timeout: Duration,
}
