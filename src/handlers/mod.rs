//! HTTP handlers module
//!
//! - `groups` directory listing, statistics, analytics and group writes
//! - `reviews` review listing and submission
//! - `health` database liveness probe
//! - `response` the JSON/CORS envelope they share

pub mod groups;
pub mod health;
pub mod response;
pub mod reviews;
