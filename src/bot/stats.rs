//! Runtime statistics for the bot.

/// Runtime statistics for the bot.
#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub updates_processed: u64,
    pub dialogs_started: u64,
    pub dialogs_cancelled: u64,
    pub input_retries: u64,
    pub deals_recorded: u64,
    pub clients_recorded: u64,
}
