//! Telegram channel analytics
//!
//! A bot without admin rights can only read public chat information, so the
//! result is limited to `getChat` fields plus the member count.

use std::time::Duration;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;
use crate::config::TelegramConfig;
use crate::models::analytics::{AnalyticsReport, TelegramMetrics};
use crate::utils::errors::{AnalyticsError, AnalyticsResult, DirectoryError, Result};
use crate::utils::logging::log_api_error;

/// Bot API envelope
#[derive(Debug, Deserialize)]
struct TelegramEnvelope<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramChat {
    pub id: i64,
    #[serde(rename = "type")]
    pub chat_type: String,
    pub title: Option<String>,
    pub username: Option<String>,
    pub description: Option<String>,
}

/// Turn a stored channel reference into a `chat_id` the Bot API accepts
///
/// Accepts `@name`, `name`, `t.me/name` and `https://t.me/name` links.
/// Numeric chat ids are passed through untouched.
pub fn normalize_channel_id(raw: &str) -> Option<String> {
    let trimmed = raw.trim();

    let reference = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        let url = Url::parse(trimmed).ok()?;
        match url.host_str() {
            Some("t.me") | Some("telegram.me") => url.path_segments()?.find(|s| !s.is_empty())?.to_string(),
            _ => return None,
        }
    } else {
        trimmed
            .strip_prefix("t.me/")
            .or_else(|| trimmed.strip_prefix("telegram.me/"))
            .unwrap_or(trimmed)
            .trim_end_matches('/')
            .to_string()
    };

    if reference.is_empty() || reference == "@" {
        return None;
    }

    if reference.starts_with('@') || reference.parse::<i64>().is_ok() {
        Some(reference)
    } else {
        Some(format!("@{}", reference))
    }
}

/// Telegram Bot API client for channel analytics
#[derive(Debug, Clone)]
pub struct TelegramService {
    client: Client,
    config: TelegramConfig,
}

impl TelegramService {
    /// Create a new TelegramService instance
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("GroupReviews/1.0")
            .build()
            .map_err(DirectoryError::Http)?;

        Ok(Self { client, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.bot_token().is_some()
    }

    /// Fetch analytics for a channel, degrading every failure to "unavailable"
    pub async fn fetch_analytics(&self, channel_id: &str) -> AnalyticsReport {
        match self.collect(channel_id).await {
            Ok(metrics) => AnalyticsReport::telegram(metrics),
            Err(e) => {
                log_api_error("telegram", &e.to_string(), Some(channel_id));
                AnalyticsReport::unavailable(e.to_string())
            }
        }
    }

    async fn collect(&self, channel_id: &str) -> AnalyticsResult<TelegramMetrics> {
        let token = self
            .config
            .bot_token()
            .ok_or(AnalyticsError::TokenNotConfigured { platform: "Telegram bot" })?;

        let chat_id = normalize_channel_id(channel_id).ok_or_else(|| {
            AnalyticsError::Provider(format!("Invalid Telegram channel id: {}", channel_id))
        })?;

        debug!(chat_id = %chat_id, "Requesting Telegram chat info");
        let chat: TelegramChat = self.call(token, "getChat", &chat_id).await?;

        let subscribers = match self.call::<i64>(token, "getChatMemberCount", &chat_id).await {
            Ok(count) => Some(count),
            Err(e) => {
                warn!(chat_id = %chat_id, error = %e, "Failed to read Telegram member count");
                None
            }
        };

        Ok(TelegramMetrics {
            subscribers,
            title: chat.title,
            description: chat.description,
            username: chat.username,
            chat_type: chat.chat_type,
        })
    }

    async fn call<T: DeserializeOwned>(&self, token: &str, method: &str, chat_id: &str) -> AnalyticsResult<T> {
        let url = format!(
            "{}/bot{}/{}",
            self.config.api_url.trim_end_matches('/'),
            token,
            method
        );

        // Errors come back as JSON with a 4xx status, so the body is read regardless.
        // The URL embeds the bot token and must not reach error messages.
        let envelope: TelegramEnvelope<T> = self
            .client
            .get(&url)
            .query(&[("chat_id", chat_id)])
            .send()
            .await
            .map_err(|e| AnalyticsError::from(e.without_url()))?
            .json()
            .await
            .map_err(|e| AnalyticsError::from(e.without_url()))?;

        match envelope {
            TelegramEnvelope { ok: true, result: Some(result), .. } => Ok(result),
            TelegramEnvelope { description, .. } => Err(AnalyticsError::Provider(
                description.unwrap_or_else(|| format!("Telegram API call {} failed", method)),
            )),
        }
    }
}
