//! Utilities module
//!
//! This module contains error types, logging setup and small helpers
//! shared by the handlers, services and repositories.

pub mod errors;
pub mod helpers;
pub mod logging;

pub use errors::{DirectoryError, AnalyticsError, ErrorSeverity, Result, AnalyticsResult};
