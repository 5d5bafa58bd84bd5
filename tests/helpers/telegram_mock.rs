//! Mock Telegram Bot API server for testing
//!
//! Simulates `getChat` and `getChatMemberCount` with wiremock.

use serde_json::{json, Value};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

pub const TEST_BOT_TOKEN: &str = "12345:test_token";

/// Mock Telegram API server for testing
pub struct TelegramMockServer {
    pub server: MockServer,
}

impl TelegramMockServer {
    /// Create a new mock Telegram API server
    pub async fn new() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL to configure as `telegram.api_url`
    pub fn api_url(&self) -> String {
        self.server.uri()
    }

    fn method_path(name: &str) -> String {
        format!("/bot{}/{}", TEST_BOT_TOKEN, name)
    }

    /// Setup mock for getChat
    pub async fn mock_get_chat(&self, chat_id: &str, title: &str, username: &str) {
        let body = json!({
            "ok": true,
            "result": {
                "id": -1001234567890_i64,
                "type": "channel",
                "title": title,
                "username": username,
                "description": "Weekly swing socials"
            }
        });

        Mock::given(method("GET"))
            .and(path(Self::method_path("getChat")))
            .and(query_param("chat_id", chat_id))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Setup mock for getChatMemberCount
    pub async fn mock_member_count(&self, chat_id: &str, count: i64) {
        Mock::given(method("GET"))
            .and(path(Self::method_path("getChatMemberCount")))
            .and(query_param("chat_id", chat_id))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "result": count })))
            .mount(&self.server)
            .await;
    }

    /// Setup an API error for any call of `name`
    pub async fn mock_error(&self, name: &str, status: u16, description: &str) {
        let body: Value = json!({
            "ok": false,
            "error_code": status,
            "description": description
        });

        Mock::given(method("GET"))
            .and(path(Self::method_path(name)))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}
