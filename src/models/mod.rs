//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod analytics;
pub mod group;
pub mod review;

// Re-export commonly used models
pub use analytics::{AnalyticsReport, PlatformMetrics, VkMetrics, TelegramMetrics};
pub use group::{GroupWithRating, GroupStats, GroupStatsRow, RatingDistribution, GroupSort, GroupFilter, GroupFields, GroupUpdate, AnalyticsSource, CreateGroupRequest, UpdateGroupRequest};
pub use review::{Review, ReviewWithGroup, CreateReviewRequest, NewReview};
