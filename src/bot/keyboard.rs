//! Reply keyboards for the deal dialogue.

use crate::bot::messages;
use crate::telegram::{KeyboardButton, ReplyKeyboardMarkup, ReplyKeyboardRemove, ReplyMarkup};

/// Menu button texts; pressing a button sends its text back as a message.
pub mod buttons {
    pub const NEW_DEAL: &str = "➕ Новая сделка";
    pub const RECENT_DEALS: &str = "📋 Последние сделки";
    pub const CANCEL: &str = "✖️ Отмена";
}

/// Main menu shown after /start and after each recorded deal.
pub fn main_menu() -> ReplyMarkup {
    ReplyMarkup::Keyboard(ReplyKeyboardMarkup {
        keyboard: vec![vec![
            KeyboardButton::new(buttons::NEW_DEAL),
            KeyboardButton::new(buttons::RECENT_DEALS),
        ]],
        resize_keyboard: true,
        one_time_keyboard: false,
    })
}

/// Keyboard of known client names, two per row, truncated to `max` names,
/// with a cancel button underneath.
pub fn client_picker(names: &[String], max: usize) -> ReplyMarkup {
    let shown: Vec<KeyboardButton> = names
        .iter()
        .take(max)
        .map(|name| KeyboardButton::new(name.clone()))
        .collect();

    let mut keyboard: Vec<Vec<KeyboardButton>> =
        shown.chunks(2).map(|row| row.to_vec()).collect();
    keyboard.push(vec![KeyboardButton::new(buttons::CANCEL)]);

    ReplyMarkup::Keyboard(ReplyKeyboardMarkup {
        keyboard,
        resize_keyboard: true,
        one_time_keyboard: true,
    })
}

/// Keyboard offering to skip the notes field.
pub fn skip_notes() -> ReplyMarkup {
    ReplyMarkup::Keyboard(ReplyKeyboardMarkup {
        keyboard: vec![
            vec![KeyboardButton::new(messages::SKIP_MARK)],
            vec![KeyboardButton::new(buttons::CANCEL)],
        ],
        resize_keyboard: true,
        one_time_keyboard: true,
    })
}

/// Removes the custom keyboard for free-text and numeric steps.
pub fn remove() -> ReplyMarkup {
    ReplyMarkup::Remove(ReplyKeyboardRemove::new())
}
