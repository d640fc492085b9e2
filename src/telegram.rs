//! Telegram Bot API transport for the run report.

use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, info};
use ureq::Agent;

use crate::config::TelegramConfig;
use crate::error::{DeliveryError, excerpt};
use crate::whm::MAX_BODY_BYTES;

const API_BASE: &str = "https://api.telegram.org";
const SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Anything that can deliver one text message.
pub trait MessageSink {
    fn send(&self, text: &str) -> Result<(), DeliveryError>;
}

impl<T: MessageSink + ?Sized> MessageSink for &T {
    fn send(&self, text: &str) -> Result<(), DeliveryError> {
        (**self).send(text)
    }
}

#[derive(Debug, Deserialize)]
struct SendMessageAck {
    #[serde(default)]
    ok: bool,
    description: Option<String>,
}

pub struct TelegramClient {
    agent: Agent,
    endpoint: String,
    chat_id: String,
}

impl TelegramClient {
    pub fn new(config: &TelegramConfig) -> Self {
        Self::with_api_base(config, API_BASE)
    }

    pub fn with_api_base(config: &TelegramConfig, api_base: &str) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(SEND_TIMEOUT))
            .http_status_as_error(false)
            .build()
            .into();

        TelegramClient {
            agent,
            endpoint: format!(
                "{}/bot{}/sendMessage",
                api_base.trim_end_matches('/'),
                config.bot_token
            ),
            chat_id: config.chat_id.clone(),
        }
    }
}

impl MessageSink for TelegramClient {
    fn send(&self, text: &str) -> Result<(), DeliveryError> {
        debug!("Sending Telegram message ({} chars)", text.chars().count());

        let mut response = self
            .agent
            .post(&self.endpoint)
            .send_form([
                ("chat_id", self.chat_id.as_str()),
                ("text", text),
                ("parse_mode", "HTML"),
                ("disable_web_page_preview", "true"),
            ])
            .map_err(|e| {
                info!("Telegram connection error: {e}");
                DeliveryError::Transport(e.to_string())
            })?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_BYTES)
            .read_to_vec();

        if status != 200 {
            let body = body
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
                .unwrap_or_default();
            info!("Telegram API error: HTTP {status} - {}", excerpt(&body, 500));
            return Err(DeliveryError::HttpStatus { status, body });
        }

        let body = body.map_err(|e| DeliveryError::Transport(format!("read response body: {e}")))?;
        let ack: SendMessageAck = serde_json::from_slice(&body).map_err(|e| {
            info!("Telegram API failed: unreadable response");
            DeliveryError::Decode(e.to_string())
        })?;

        if !ack.ok {
            let reason = ack
                .description
                .unwrap_or_else(|| "Unknown error".to_string());
            info!("Telegram API failed: {reason}");
            return Err(DeliveryError::Rejected(reason));
        }

        Ok(())
    }
}
