//! Minimal Telegram Bot API client used for the deal dialogue.

mod client;
mod types;

pub use client::{TelegramClient, TelegramError};
pub use types::{
    ApiResponse, Chat, KeyboardButton, Message, ReplyKeyboardMarkup, ReplyKeyboardRemove,
    ReplyMarkup, Update,
};
