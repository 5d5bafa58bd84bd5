//! VK community analytics
//!
//! Reads a community's subscriber count via `groups.getById` and derives
//! engagement figures from its most recent wall posts (`wall.get`).

use std::time::Duration;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use crate::config::VkConfig;
use crate::models::analytics::{AnalyticsReport, VkMetrics};
use crate::utils::errors::{AnalyticsError, AnalyticsResult, DirectoryError, Result};
use crate::utils::helpers::round_to;
use crate::utils::logging::log_api_error;

/// VK API envelope: either `response` or `error` is set
#[derive(Debug, Deserialize)]
struct VkEnvelope<T> {
    response: Option<T>,
    error: Option<VkApiError>,
}

#[derive(Debug, Deserialize)]
pub struct VkApiError {
    pub error_code: i64,
    pub error_msg: String,
}

/// `groups.getById` returns a bare list up to API 5.139 and `{groups: [...]}` after
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GroupsById {
    List(Vec<VkGroup>),
    Wrapped { groups: Vec<VkGroup> },
}

impl GroupsById {
    fn into_first(self) -> Option<VkGroup> {
        match self {
            GroupsById::List(groups) | GroupsById::Wrapped { groups } => groups.into_iter().next(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VkGroup {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub members_count: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct WallResponse {
    #[serde(default)]
    items: Vec<WallPost>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Counter {
    #[serde(default)]
    pub count: i64,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct WallPost {
    #[serde(default)]
    pub likes: Counter,
    #[serde(default)]
    pub comments: Counter,
    #[serde(default)]
    pub reposts: Counter,
    #[serde(default)]
    pub views: Counter,
}

/// Derive per-post averages and the engagement rate
///
/// Engagement is `(likes + comments + reposts) / posts / members * 100`, zero
/// when there are no posts or no members, rounded to two decimals. Averages use
/// integer division.
pub fn compute_metrics(name: String, members: i64, posts: &[WallPost]) -> VkMetrics {
    let post_count = posts.len() as i64;
    let likes: i64 = posts.iter().map(|p| p.likes.count).sum();
    let comments: i64 = posts.iter().map(|p| p.comments.count).sum();
    let reposts: i64 = posts.iter().map(|p| p.reposts.count).sum();
    let views: i64 = posts.iter().map(|p| p.views.count).sum();

    let engagement_rate = if post_count > 0 && members > 0 {
        let interactions = (likes + comments + reposts) as f64;
        round_to(interactions / post_count as f64 / members as f64 * 100.0, 2)
    } else {
        0.0
    };

    let per_post = |total: i64| if post_count > 0 { total / post_count } else { 0 };

    VkMetrics {
        name,
        subscribers: members,
        posts_analyzed: post_count,
        avg_likes: per_post(likes),
        avg_comments: per_post(comments),
        avg_reposts: per_post(reposts),
        avg_views: per_post(views),
        engagement_rate,
    }
}

/// VK API client for community analytics
#[derive(Debug, Clone)]
pub struct VkService {
    client: Client,
    config: VkConfig,
}

impl VkService {
    /// Create a new VkService instance
    pub fn new(config: VkConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("GroupReviews/1.0")
            .build()
            .map_err(DirectoryError::Http)?;

        Ok(Self { client, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.token().is_some()
    }

    /// Fetch analytics for a community, degrading every failure to "unavailable"
    pub async fn fetch_analytics(&self, group_id: &str) -> AnalyticsReport {
        match self.collect(group_id).await {
            Ok(metrics) => AnalyticsReport::vk(metrics),
            Err(e) => {
                log_api_error("vk", &e.to_string(), Some(group_id));
                AnalyticsReport::unavailable(e.to_string())
            }
        }
    }

    async fn collect(&self, group_id: &str) -> AnalyticsResult<VkMetrics> {
        let token = self
            .config
            .token()
            .ok_or(AnalyticsError::TokenNotConfigured { platform: "VK API" })?;

        // Owner ids of communities are negative; accept them as input too
        let group_id = group_id.trim().trim_start_matches('-');

        debug!(group_id = group_id, "Requesting VK community info");
        let group = self
            .call::<GroupsById>(
                "groups.getById",
                token,
                &[("group_id", group_id.to_string()), ("fields", "members_count".to_string())],
            )
            .await?
            .into_first()
            .ok_or_else(|| AnalyticsError::Provider("VK community not found".to_string()))?;

        let wall = self
            .call::<WallResponse>(
                "wall.get",
                token,
                &[
                    ("owner_id", format!("-{}", group.id)),
                    ("count", self.config.posts_to_analyze.to_string()),
                ],
            )
            .await?;

        let members = group.members_count.unwrap_or(0);
        debug!(group_id = group.id, members = members, posts = wall.items.len(), "VK data received");

        Ok(compute_metrics(group.name, members, &wall.items))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        token: &str,
        params: &[(&str, String)],
    ) -> AnalyticsResult<T> {
        let url = format!("{}/{}", self.config.api_url.trim_end_matches('/'), method);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("access_token", token), ("v", self.config.api_version.as_str())])
            .send()
            .await
            .map_err(|e| AnalyticsError::from(e.without_url()))?;

        // The query string carries the access token; keep it out of messages
        let envelope: VkEnvelope<T> = response
            .json()
            .await
            .map_err(|e| AnalyticsError::from(e.without_url()))?;

        match envelope {
            VkEnvelope { error: Some(error), .. } => Err(AnalyticsError::Provider(format!(
                "VK API error {}: {}",
                error.error_code, error.error_msg
            ))),
            VkEnvelope { response: Some(response), .. } => Ok(response),
            VkEnvelope { response: None, error: None } => Err(AnalyticsError::Provider(
                "VK API returned an empty response".to_string(),
            )),
        }
    }
}
