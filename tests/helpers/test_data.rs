//! Test data helpers for building request bodies

use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;
use serde_json::{json, Value};

/// Body for creating a group with the given name and platform
pub fn group_body(name: &str, platform: &str) -> Value {
    json!({
        "name": name,
        "platform": platform,
        "members": "1.2K",
        "description": Sentence(3..8).fake::<String>(),
        "link": format!("https://example.com/{}", name.to_lowercase().replace(' ', "-")),
        "avatar": ""
    })
}

/// Body for creating a group with a random name
pub fn random_group_body(platform: &str) -> Value {
    group_body(&CompanyName().fake::<String>(), platform)
}

/// Body for submitting a review
pub fn review_body(group_id: i64, rating: i64) -> Value {
    json!({
        "group_id": group_id,
        "user_name": Name().fake::<String>(),
        "rating": rating,
        "text": Sentence(4..10).fake::<String>()
    })
}
