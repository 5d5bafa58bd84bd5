//! Group Reviews API
//!
//! An HTTP directory of VK and Telegram communities with user reviews,
//! rating statistics and on-demand social analytics.

pub mod config;
pub mod database;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{DirectoryError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use services::AnalyticsService;
pub use state::AppState;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
