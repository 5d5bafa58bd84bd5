//! Normalized social analytics model
//!
//! Both external adapters produce an [`AnalyticsReport`]. Provider failures are
//! never errors at this level: they become `available: false` with a message.

use serde::{Deserialize, Serialize};

/// Disclaimer attached to Telegram results
pub const TELEGRAM_ADMIN_NOTICE: &str = "Full statistics require admin access";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub available: bool,
    #[serde(flatten)]
    pub metrics: Option<PlatformMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "platform", rename_all = "lowercase")]
pub enum PlatformMetrics {
    Vk(VkMetrics),
    Telegram(TelegramMetrics),
}

/// Engagement figures computed from a VK community's recent wall posts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VkMetrics {
    pub name: String,
    pub subscribers: i64,
    pub posts_analyzed: i64,
    pub avg_likes: i64,
    pub avg_comments: i64,
    pub avg_reposts: i64,
    pub avg_views: i64,
    pub engagement_rate: f64,
}

/// Public channel information available to a bot without admin rights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelegramMetrics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscribers: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub username: Option<String>,
    #[serde(rename = "type")]
    pub chat_type: String,
}

impl AnalyticsReport {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            available: false,
            metrics: None,
            message: Some(message.into()),
        }
    }

    pub fn vk(metrics: VkMetrics) -> Self {
        Self {
            available: true,
            metrics: Some(PlatformMetrics::Vk(metrics)),
            message: None,
        }
    }

    pub fn telegram(metrics: TelegramMetrics) -> Self {
        Self {
            available: true,
            metrics: Some(PlatformMetrics::Telegram(metrics)),
            message: Some(TELEGRAM_ADMIN_NOTICE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unavailable_shape() {
        let value = serde_json::to_value(AnalyticsReport::unavailable("VK group ID not configured")).unwrap();
        assert_eq!(value, json!({"available": false, "message": "VK group ID not configured"}));
    }

    #[test]
    fn test_vk_shape_is_flat() {
        let report = AnalyticsReport::vk(VkMetrics {
            name: "Alpha".to_string(),
            subscribers: 1000,
            posts_analyzed: 10,
            avg_likes: 12,
            avg_comments: 3,
            avg_reposts: 1,
            avg_views: 400,
            engagement_rate: 1.6,
        });
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["available"], true);
        assert_eq!(value["platform"], "vk");
        assert_eq!(value["subscribers"], 1000);
        assert_eq!(value["engagement_rate"], 1.6);
        assert!(value.get("message").is_none());
    }

    #[test]
    fn test_telegram_shape_carries_notice() {
        let report = AnalyticsReport::telegram(TelegramMetrics {
            subscribers: Some(250),
            title: Some("Alpha".to_string()),
            description: None,
            username: Some("alpha".to_string()),
            chat_type: "channel".to_string(),
        });
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["platform"], "telegram");
        assert_eq!(value["type"], "channel");
        assert_eq!(value["message"], TELEGRAM_ADMIN_NOTICE);
    }
}
