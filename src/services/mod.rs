//! Services module
//!
//! This module contains the external analytics adapters and the dispatcher
//! that picks one based on a group's platform.

pub mod telegram;
pub mod vk;

// Re-export commonly used services
pub use telegram::{TelegramService, normalize_channel_id};
pub use vk::{VkService, compute_metrics};

use crate::config::settings::Settings;
use crate::models::{AnalyticsReport, AnalyticsSource};
use crate::utils::errors::Result;
use crate::utils::helpers::non_empty;

/// Routes analytics requests to the adapter matching a group's platform
#[derive(Debug, Clone)]
pub struct AnalyticsService {
    pub vk: VkService,
    pub telegram: TelegramService,
}

impl AnalyticsService {
    /// Create a new AnalyticsService with both adapters initialized
    pub fn new(settings: &Settings) -> Result<Self> {
        Ok(Self {
            vk: VkService::new(settings.vk.clone())?,
            telegram: TelegramService::new(settings.telegram.clone())?,
        })
    }

    /// Fetch analytics for a stored group
    ///
    /// Never fails: a missing external id, an unsupported platform or a
    /// provider error all produce an unavailable report.
    pub async fn for_group(&self, source: &AnalyticsSource) -> AnalyticsReport {
        match source.platform.trim().to_ascii_lowercase().as_str() {
            "vk" => match non_empty(source.vk_group_id.clone()) {
                Some(vk_group_id) => self.vk.fetch_analytics(&vk_group_id).await,
                None => AnalyticsReport::unavailable("VK group ID not configured"),
            },
            "telegram" => match non_empty(source.telegram_channel_id.clone()) {
                Some(channel_id) => self.telegram.fetch_analytics(&channel_id).await,
                None => AnalyticsReport::unavailable("Telegram channel ID not configured"),
            },
            other => AnalyticsReport::unavailable(format!("Analytics not supported for platform {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(platform: &str, vk: Option<&str>, telegram: Option<&str>) -> AnalyticsSource {
        AnalyticsSource {
            id: 1,
            platform: platform.to_string(),
            vk_group_id: vk.map(str::to_string),
            telegram_channel_id: telegram.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_vk_group_without_id_is_unavailable() {
        let service = AnalyticsService::new(&Settings::default()).unwrap();
        let report = service.for_group(&source("vk", None, Some("@other"))).await;
        assert!(!report.available);
        assert_eq!(report.message.as_deref(), Some("VK group ID not configured"));

        let report = service.for_group(&source("vk", Some("  "), None)).await;
        assert!(!report.available);
    }

    #[tokio::test]
    async fn test_telegram_group_without_id_is_unavailable() {
        let service = AnalyticsService::new(&Settings::default()).unwrap();
        let report = service.for_group(&source("Telegram", None, None)).await;
        assert_eq!(report.message.as_deref(), Some("Telegram channel ID not configured"));
    }

    #[tokio::test]
    async fn test_unknown_platform_is_unavailable() {
        let service = AnalyticsService::new(&Settings::default()).unwrap();
        let report = service.for_group(&source("discord", None, None)).await;
        assert!(!report.available);
        assert_eq!(report.message.as_deref(), Some("Analytics not supported for platform discord"));
    }
}
