use std::time::Duration;

use crate::telegram::types::{ApiResponse, ReplyMarkup, Update};

const TELEGRAM_API_URL: &str = "https://api.telegram.org/bot";
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_MESSAGE_LENGTH: usize = 4096;

/// Ошибка Telegram Bot API
#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Telegram API error: {0}")]
    Api(String),
}

/// Клиент Telegram Bot API: длинный опрос getUpdates и отправка сообщений
pub struct TelegramClient {
    http_client: reqwest::Client,
    api_url: String,
    poll_timeout: Duration,
}

impl TelegramClient {
    /// Создает новый клиент для данного токена бота
    ///
    /// HTTP timeout берется с запасом поверх poll_timeout, иначе длинный
    /// опрос обрывался бы раньше ответа сервера.
    pub fn new(bot_token: &str, poll_timeout: Duration) -> Result<Self, TelegramError> {
        if bot_token.is_empty() {
            return Err(TelegramError::Api("bot_token is required".to_string()));
        }

        let http_client = reqwest::Client::builder()
            .timeout(poll_timeout + DEFAULT_HTTP_TIMEOUT)
            .build()?;

        let api_url = format!("{}{}", TELEGRAM_API_URL, bot_token);

        Ok(Self {
            http_client,
            api_url,
            poll_timeout,
        })
    }

    /// Длинный опрос новых обновлений начиная с offset
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, TelegramError> {
        let url = format!("{}/getUpdates", self.api_url);

        let payload = serde_json::json!({
            "offset": offset,
            "timeout": self.poll_timeout.as_secs(),
            "allowed_updates": ["message"],
        });

        let response = self.http_client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TelegramError::Api(format!("{} - {}", status, body)));
        }

        let body: ApiResponse<Vec<Update>> = response.json().await?;
        if !body.ok {
            return Err(TelegramError::Api(
                body.description.unwrap_or_else(|| "unknown".to_string()),
            ));
        }

        Ok(body.result.unwrap_or_default())
    }

    /// Отправляет текстовое сообщение, опционально с клавиатурой
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        reply_markup: Option<ReplyMarkup>,
    ) -> Result<(), TelegramError> {
        let text = truncate_to_limit(text);
        let url = format!("{}/sendMessage", self.api_url);

        let payload = match reply_markup {
            Some(markup) => serde_json::json!({
                "chat_id": chat_id,
                "text": text,
                "reply_markup": markup,
            }),
            None => serde_json::json!({
                "chat_id": chat_id,
                "text": text,
            }),
        };

        let response = self.http_client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TelegramError::Api(format!("{} - {}", status, body)));
        }

        Ok(())
    }
}

/// Обрезает сообщение до лимита Telegram, не разрывая UTF-8 символы
fn truncate_to_limit(text: &str) -> &str {
    if text.len() <= MAX_MESSAGE_LENGTH {
        return text;
    }

    let mut end = MAX_MESSAGE_LENGTH;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
