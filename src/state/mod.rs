//! Shared application state
//!
//! Handed to every handler through `web::Data`. Both members are cheap to
//! clone: the database service wraps a pool and the adapters wrap
//! `reqwest::Client`s.

use crate::database::DatabaseService;
use crate::services::AnalyticsService;

#[derive(Debug, Clone)]
pub struct AppState {
    pub db: DatabaseService,
    pub analytics: AnalyticsService,
}

impl AppState {
    pub fn new(db: DatabaseService, analytics: AnalyticsService) -> Self {
        Self { db, analytics }
    }
}
