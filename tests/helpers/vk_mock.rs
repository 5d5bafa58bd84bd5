//! Mock VK API server for testing
//!
//! Simulates `groups.getById` and `wall.get` with wiremock. VK reports
//! errors in the body with a 200 status, and so does the mock.

use serde_json::json;
use std::time::Duration;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_VK_TOKEN: &str = "vk-test-token";

/// (likes, comments, reposts, views)
pub type PostCounters = (i64, i64, i64, i64);

/// Mock VK API server for testing
pub struct VkMockServer {
    pub server: MockServer,
}

impl VkMockServer {
    /// Create a new mock VK API server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to configure as `vk.api_url`
    pub fn api_url(&self) -> String {
        format!("{}/method", self.server.uri())
    }

    /// Setup mock for groups.getById
    pub async fn mock_group(&self, group_id: i64, name: &str, members: i64) {
        let body = json!({
            "response": [{
                "id": group_id,
                "name": name,
                "screen_name": format!("club{}", group_id),
                "members_count": members
            }]
        });

        Mock::given(method("GET"))
            .and(path("/method/groups.getById"))
            .and(query_param("group_id", group_id.to_string()))
            .and(query_param("access_token", TEST_VK_TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for wall.get of a community
    pub async fn mock_wall(&self, group_id: i64, posts: &[PostCounters]) {
        let items: Vec<_> = posts
            .iter()
            .map(|&(likes, comments, reposts, views)| {
                json!({
                    "likes": { "count": likes },
                    "comments": { "count": comments },
                    "reposts": { "count": reposts },
                    "views": { "count": views }
                })
            })
            .collect();

        Mock::given(method("GET"))
            .and(path("/method/wall.get"))
            .and(query_param("owner_id", format!("-{}", group_id)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "response": { "count": items.len(), "items": items } })),
            )
            .mount(&self.server)
            .await;
    }

    /// Setup a VK error envelope for `api_method`
    pub async fn mock_error(&self, api_method: &str, code: i64, message: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/method/{}", api_method)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": { "error_code": code, "error_msg": message }
            })))
            .mount(&self.server)
            .await;
    }

    /// Setup a response that arrives after `delay`
    pub async fn mock_slow(&self, api_method: &str, delay: Duration) {
        Mock::given(method("GET"))
            .and(path(format!("/method/{}", api_method)))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "response": [] }))
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }
}
