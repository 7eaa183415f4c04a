//! Outbound chat notification.
//!
//! One plain-text summary per result, sent to a Telegram chat through the
//! bot API's `sendMessage` endpoint. A send failure is the caller's to log;
//! it never fails the batch.

use crate::claim::ClaimResult;
use crate::client::ClientError;

const TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Sends claim summaries to one chat via a bot token.
pub struct Notifier {
    bot_token: String,
    chat_id: String,
}

impl Notifier {
    pub fn new(bot_token: &str, chat_id: &str) -> Self {
        Notifier {
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
        }
    }

    /// Build a notifier from optional config values; `None` unless both are
    /// present and non-empty.
    pub fn from_values(bot_token: Option<String>, chat_id: Option<String>) -> Option<Self> {
        match (bot_token, chat_id) {
            (Some(token), Some(chat)) if !token.is_empty() && !chat.is_empty() => {
                Some(Notifier::new(&token, &chat))
            }
            _ => None,
        }
    }

    /// Build a notifier from `BOT_TOKEN` and `CHAT_ID`.
    pub fn from_env() -> Option<Self> {
        Notifier::from_values(
            std::env::var("BOT_TOKEN").ok(),
            std::env::var("CHAT_ID").ok(),
        )
    }

    /// One-line summary of a result, safe to forward (masked uid only).
    pub fn summary(result: &ClaimResult) -> String {
        format!(
            "{}: {} (day {}, {}, UID {})",
            result.label, result.status, result.day, result.reward, result.uid
        )
    }

    /// Send one text message to the configured chat.
    pub async fn send(&self, text: &str) -> Result<(), ClientError> {
        let url = format!(
            "{}/bot{}/sendMessage",
            TELEGRAM_API_URL, self.bot_token
        );
        let chat_id = self.chat_id.clone();
        let text = text.to_string();

        tokio::task::spawn_blocking(move || {
            let agent = ureq::Agent::new_with_defaults();
            agent
                .get(&url)
                .query("chat_id", &chat_id)
                .query("text", &text)
                .call()
                .map_err(|e| ClientError::Transport {
                    message: e.to_string(),
                })?;
            Ok(())
        })
        .await
        .map_err(|e| ClientError::Transport {
            message: format!("task join error: {}", e),
        })?
    }
}

// ──────────────────────────────────────────────
// Tests
// ──────────────────────────────────────────────
