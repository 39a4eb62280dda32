use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::{Report, ReportSink, SinkError};

/// A sink that delivers reports to a Telegram chat via the Bot API.
pub struct TelegramSink {
    client: Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramSink {
    pub fn new(bot_token: impl Into<String>, chat_id: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            bot_token: bot_token.into(),
            chat_id: chat_id.into(),
        }
    }
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<&'a str>,
}

impl<'a> SendMessage<'a> {
    fn for_report(chat_id: &'a str, report: &'a Report) -> Self {
        Self {
            chat_id,
            text: &report.body,
            parse_mode: report.html.then_some("HTML"),
        }
    }
}

#[async_trait]
impl ReportSink for TelegramSink {
    async fn deliver(&self, report: &Report) -> Result<(), SinkError> {
        let api_url = format!(
            "https://api.telegram.org/bot{}/sendMessage",
            self.bot_token
        );
        let payload = SendMessage::for_report(&self.chat_id, report);

        let response = self.client.post(&api_url).json(&payload).send().await?;
        let status = response.status();

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            return Err(SinkError::DeliveryFailed(format!(
                "Telegram API returned non-success status: {status}. Body: {error_body}"
            )));
        }

        debug!("report delivered to Telegram chat {}", self.chat_id);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
