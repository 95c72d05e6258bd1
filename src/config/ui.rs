//! Chat UI configuration.

use serde::Deserialize;

/// Limits for reply-keyboard rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// How many known client names to offer as keyboard buttons
    /// (default: 20).
    pub clients_max_buttons: Option<usize>,
}
