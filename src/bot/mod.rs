//! Main deal desk bot implementation.
//!
//! Coordinates the Telegram dialogue, numeric validation, revenue
//! estimation, and the CSV stores.

mod dialog;
mod error;
mod keyboard;
mod messages;
mod stats;

pub use dialog::{DealDialog, DialogOutcome, DialogStep};
pub use error::BotError;
pub use stats::Stats;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::domain::{Deal, DealDraft, DealIdGenerator, estimate_revenue_usd};
use crate::storage::{
    ClientDirectory, CsvClientDirectory, CsvDealLedger, CsvStorageConfig, DealLedger,
};
use crate::telegram::{ReplyMarkup, TelegramClient, Update};

const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_CLIENTS_MAX_BUTTONS: usize = 20;
const RECENT_DEALS_SHOWN: usize = 5;
const POLL_RETRY_DELAY: Duration = Duration::from_secs(3);

/// Main bot that drives the deal-recording dialogue over Telegram.
pub struct Bot {
    cfg: Config,
    telegram: TelegramClient,
    deals: Arc<dyn DealLedger>,
    clients: Arc<dyn ClientDirectory>,

    // Runtime state
    id_gen: Mutex<DealIdGenerator>,
    dialogs: Mutex<HashMap<i64, DealDialog>>,
    running: Mutex<bool>,
    stats: Mutex<Stats>,

    clients_max_buttons: usize,
}

impl Bot {
    /// Creates a new Bot instance, bootstrapping the CSV stores.
    pub fn new(cfg: Config) -> Result<Self, BotError> {
        let storage_config = csv_storage_config(&cfg);
        let deals = CsvDealLedger::new(&storage_config)?;
        let clients = CsvClientDirectory::new(&storage_config)?;

        // Poll timeout from config or default
        let poll_timeout = if cfg.telegram.poll_timeout.as_secs() > 0 {
            cfg.telegram.poll_timeout
        } else {
            DEFAULT_POLL_TIMEOUT
        };
        let telegram = TelegramClient::new(&cfg.telegram.bot_token, poll_timeout)?;

        let clients_max_buttons = cfg
            .ui
            .as_ref()
            .and_then(|ui| ui.clients_max_buttons)
            .unwrap_or(DEFAULT_CLIENTS_MAX_BUTTONS);

        Ok(Bot {
            cfg,
            telegram,
            deals: Arc::new(deals),
            clients: Arc::new(clients),
            id_gen: Mutex::new(DealIdGenerator::new()),
            dialogs: Mutex::new(HashMap::new()),
            running: Mutex::new(false),
            stats: Mutex::new(Stats::default()),
            clients_max_buttons,
        })
    }

    /// Starts the long-polling loop.
    pub async fn start(&self) -> Result<(), BotError> {
        {
            let mut running = self.running.lock().await;
            if *running {
                return Err(BotError::AlreadyRunning);
            }
            *running = true;
        }

        info!(app = %self.cfg.app.name, "Starting deal desk bot");
        self.run_poll_loop().await
    }

    /// Gracefully stops the bot after the current poll returns.
    pub async fn stop(&self) {
        {
            let mut running = self.running.lock().await;
            if !*running {
                return;
            }
            *running = false;
        }

        let stats = self.stats().await;
        info!(
            updates = stats.updates_processed,
            dialogs_started = stats.dialogs_started,
            dialogs_cancelled = stats.dialogs_cancelled,
            deals = stats.deals_recorded,
            clients = stats.clients_recorded,
            retries = stats.input_retries,
            "Bot stopped"
        );
    }

    /// Returns a copy of the current statistics.
    pub async fn stats(&self) -> Stats {
        self.stats.lock().await.clone()
    }

    /// Returns true if the bot is currently running.
    pub async fn is_running(&self) -> bool {
        *self.running.lock().await
    }

    /// Main getUpdates loop.
    async fn run_poll_loop(&self) -> Result<(), BotError> {
        let mut offset = 0i64;

        loop {
            if !self.is_running().await {
                break;
            }

            let updates = match self.telegram.get_updates(offset).await {
                Ok(updates) => updates,
                Err(e) => {
                    warn!(error = %e, "getUpdates failed");
                    tokio::time::sleep(POLL_RETRY_DELAY).await;
                    continue;
                }
            };

            for update in updates {
                offset = offset.max(update.update_id + 1);
                self.handle_update(update).await;
            }
        }

        Ok(())
    }

    /// Processes one update; failures are reported to the chat and logged,
    /// never propagated into the poll loop.
    async fn handle_update(&self, update: Update) {
        {
            let mut stats = self.stats.lock().await;
            stats.updates_processed += 1;
        }

        let Some(message) = update.message else { return };
        let Some(text) = message.text else { return };
        let chat_id = message.chat.id;

        debug!(chat_id, message_id = message.message_id, text = %text, "Message received");

        if let Err(e) = self.handle_message(chat_id, text.trim()).await {
            error!(chat_id, error = %e, "Failed to handle message");
            let _ = self
                .telegram
                .send_message(chat_id, messages::OPERATION_FAILED, None)
                .await;
        }
    }

    async fn handle_message(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        match text {
            "/start" => self.send_welcome(chat_id).await,
            "/newdeal" | keyboard::buttons::NEW_DEAL => self.start_dialog(chat_id).await,
            "/deals" | keyboard::buttons::RECENT_DEALS => self.send_recent_deals(chat_id).await,
            "/cancel" | keyboard::buttons::CANCEL => self.cancel_dialog(chat_id).await,
            _ => self.advance_dialog(chat_id, text).await,
        }
    }

    async fn send_welcome(&self, chat_id: i64) -> Result<(), BotError> {
        self.telegram
            .send_message(chat_id, messages::WELCOME, Some(keyboard::main_menu()))
            .await?;
        Ok(())
    }

    /// Begins a new deal dialogue, replacing any unfinished one.
    async fn start_dialog(&self, chat_id: i64) -> Result<(), BotError> {
        let dialog = DealDialog::new();
        let first_step = dialog.step();
        self.dialogs.lock().await.insert(chat_id, dialog);

        {
            let mut stats = self.stats.lock().await;
            stats.dialogs_started += 1;
        }

        let markup = self.markup_for(first_step).await?;
        self.telegram
            .send_message(chat_id, messages::prompt_for_step(first_step), markup)
            .await?;
        Ok(())
    }

    async fn cancel_dialog(&self, chat_id: i64) -> Result<(), BotError> {
        let existed = self.dialogs.lock().await.remove(&chat_id).is_some();

        if existed {
            let mut stats = self.stats.lock().await;
            stats.dialogs_cancelled += 1;
        }

        let text = if existed {
            messages::CANCELLED
        } else {
            messages::NOTHING_TO_CANCEL
        };
        self.telegram
            .send_message(chat_id, text, Some(keyboard::main_menu()))
            .await?;
        Ok(())
    }

    /// Feeds free text into the chat's dialogue, if one is active.
    async fn advance_dialog(&self, chat_id: i64, text: &str) -> Result<(), BotError> {
        let outcome = {
            let mut dialogs = self.dialogs.lock().await;
            let Some(dialog) = dialogs.get_mut(&chat_id) else {
                drop(dialogs);
                return self.send_welcome(chat_id).await;
            };

            let outcome = dialog.apply(text);
            if matches!(outcome, DialogOutcome::Complete(_)) {
                dialogs.remove(&chat_id);
            }
            outcome
        };

        match outcome {
            DialogOutcome::Prompt(step) => {
                let markup = self.markup_for(step).await?;
                self.telegram
                    .send_message(chat_id, messages::prompt_for_step(step), markup)
                    .await?;
            }
            DialogOutcome::Retry(message) => {
                {
                    let mut stats = self.stats.lock().await;
                    stats.input_retries += 1;
                }
                self.telegram.send_message(chat_id, message, None).await?;
            }
            DialogOutcome::Complete(draft) => {
                self.record_deal(chat_id, draft).await?;
            }
        }
        Ok(())
    }

    /// Keyboard to send alongside the prompt for the given step.
    async fn markup_for(&self, step: DialogStep) -> Result<Option<ReplyMarkup>, BotError> {
        let markup = match step {
            DialogStep::ClientA | DialogStep::ClientB => {
                let known = self.clients.list().await?;
                Some(keyboard::client_picker(&known, self.clients_max_buttons))
            }
            DialogStep::Notes => Some(keyboard::skip_notes()),
            _ => Some(keyboard::remove()),
        };
        Ok(markup)
    }

    /// Estimates revenue, persists the deal and both client names, and
    /// replies with a summary.
    async fn record_deal(&self, chat_id: i64, draft: DealDraft) -> Result<(), BotError> {
        let est_rev_usd = match estimate_revenue_usd(
            draft.rub_target,
            draft.rate_a,
            draft.fee_a,
            draft.rate_b,
            draft.fee_b,
        ) {
            Ok(est) => est,
            Err(e) => {
                // The dialogue validates rates on entry, so this only
                // happens if a draft was built some other way.
                warn!(chat_id, error = %e, "Estimate rejected");
                self.telegram
                    .send_message(chat_id, messages::INVALID_RATE, Some(keyboard::main_menu()))
                    .await?;
                return Ok(());
            }
        };

        let added_a = self.clients.add_if_new(&draft.client_a).await?;
        let added_b = self.clients.add_if_new(&draft.client_b).await?;

        let opened_at = Utc::now();
        let deal_id = self.id_gen.lock().await.next(opened_at);

        let deal = Deal::open(deal_id, opened_at, draft, est_rev_usd);
        self.deals.append(&deal).await?;

        {
            let mut stats = self.stats.lock().await;
            stats.deals_recorded += 1;
            stats.clients_recorded += added_a as u64 + added_b as u64;
        }

        info!(
            deal_id = %deal.deal_id,
            client_a = %deal.client_a,
            client_b = %deal.client_b,
            est_rev_usd = %deal.est_rev_usd,
            "Deal recorded"
        );

        let summary = messages::deal_summary(&deal);
        self.telegram
            .send_message(chat_id, &summary, Some(keyboard::main_menu()))
            .await?;
        Ok(())
    }

    async fn send_recent_deals(&self, chat_id: i64) -> Result<(), BotError> {
        let deals = self.deals.read_all().await?;

        let text = if deals.is_empty() {
            messages::NO_DEALS.to_string()
        } else {
            let start = deals.len().saturating_sub(RECENT_DEALS_SHOWN);
            messages::recent_deals(&deals[start..])
        };

        self.telegram
            .send_message(chat_id, &text, Some(keyboard::main_menu()))
            .await?;
        Ok(())
    }
}

/// Resolves the CSV store locations from the optional config section.
fn csv_storage_config(cfg: &Config) -> CsvStorageConfig {
    let mut storage = CsvStorageConfig::default();
    if let Some(ref section) = cfg.storage {
        if let Some(ref dir) = section.data_dir {
            storage.data_dir = PathBuf::from(dir);
        }
        if let Some(ref file) = section.deals_file {
            storage.deals_file = file.clone();
        }
        if let Some(ref file) = section.clients_file {
            storage.clients_file = file.clone();
        }
    }
    storage
}
