//! Bot error types.

use crate::storage::StorageError;
use crate::telegram::TelegramError;

/// Bot error type.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("bot is already running")]
    AlreadyRunning,
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("telegram error: {0}")]
    Telegram(#[from] TelegramError),
}
