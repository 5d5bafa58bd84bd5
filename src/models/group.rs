//! Group model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::DirectoryError;
use crate::utils::helpers::{loose_optional_i64, loose_optional_string, loose_string, non_empty, round_to};

/// A directory entry joined with its review aggregate
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GroupWithRating {
    pub id: i64,
    pub name: String,
    pub platform: String,
    pub members: String,
    pub description: String,
    pub link: String,
    pub avatar: Option<String>,
    pub vk_group_id: Option<String>,
    pub telegram_channel_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub rating: f64,
    pub reviews_count: i64,
}

/// External identifiers needed to fetch social analytics for a group
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AnalyticsSource {
    pub id: i64,
    pub platform: String,
    pub vk_group_id: Option<String>,
    pub telegram_channel_id: Option<String>,
}

/// Count of reviews at each star value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingDistribution {
    #[serde(rename = "5")]
    pub five: i64,
    #[serde(rename = "4")]
    pub four: i64,
    #[serde(rename = "3")]
    pub three: i64,
    #[serde(rename = "2")]
    pub two: i64,
    #[serde(rename = "1")]
    pub one: i64,
}

impl RatingDistribution {
    /// Build a histogram from individual ratings, ignoring values outside 1..=5
    #[cfg(test)]
    pub fn from_ratings<I: IntoIterator<Item = i32>>(ratings: I) -> Self {
        let mut distribution = Self::default();
        for rating in ratings {
            match rating {
                5 => distribution.five += 1,
                4 => distribution.four += 1,
                3 => distribution.three += 1,
                2 => distribution.two += 1,
                1 => distribution.one += 1,
                _ => {}
            }
        }
        distribution
    }

    pub fn total(&self) -> i64 {
        self.five + self.four + self.three + self.two + self.one
    }

    /// Mean star value rounded to one decimal, `0.0` when there are no reviews
    pub fn average(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let sum = 5 * self.five + 4 * self.four + 3 * self.three + 2 * self.two + self.one;
        round_to(sum as f64 / total as f64, 1)
    }
}

/// Raw aggregate row as returned by the stats query
#[derive(Debug, Clone, FromRow)]
pub struct GroupStatsRow {
    pub id: i64,
    pub name: String,
    pub platform: String,
    pub avatar: Option<String>,
    pub members: String,
    pub created_at: DateTime<Utc>,
    pub rating_5: i64,
    pub rating_4: i64,
    pub rating_3: i64,
    pub rating_2: i64,
    pub rating_1: i64,
}

/// Per-group rating statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupStats {
    pub id: i64,
    pub name: String,
    pub platform: String,
    pub avatar: Option<String>,
    pub members_count: String,
    pub avg_rating: f64,
    pub reviews_count: i64,
    pub rating_distribution: RatingDistribution,
    pub created_at: DateTime<Utc>,
}

impl From<GroupStatsRow> for GroupStats {
    fn from(row: GroupStatsRow) -> Self {
        let rating_distribution = RatingDistribution {
            five: row.rating_5,
            four: row.rating_4,
            three: row.rating_3,
            two: row.rating_2,
            one: row.rating_1,
        };

        Self {
            id: row.id,
            name: row.name,
            platform: row.platform,
            avatar: row.avatar,
            members_count: row.members,
            avg_rating: rating_distribution.average(),
            reviews_count: rating_distribution.total(),
            rating_distribution,
            created_at: row.created_at,
        }
    }
}

/// Ordering of the group listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupSort {
    Rating,
    Reviews,
    #[default]
    CreatedAt,
}

impl GroupSort {
    /// Unknown values fall back to newest first
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("rating") => GroupSort::Rating,
            Some("reviews") => GroupSort::Reviews,
            _ => GroupSort::CreatedAt,
        }
    }

    /// ORDER BY clause; every variant ends on the primary key so results are stable
    pub fn order_clause(self) -> &'static str {
        match self {
            GroupSort::Rating => "ORDER BY rating DESC, reviews_count DESC, g.id ASC",
            GroupSort::Reviews => "ORDER BY reviews_count DESC, rating DESC, g.id ASC",
            GroupSort::CreatedAt => "ORDER BY g.created_at DESC, g.id DESC",
        }
    }
}

/// Filters applied to the group listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupFilter {
    pub search: Option<String>,
    pub platform: Option<String>,
    pub sort: GroupSort,
}

impl GroupFilter {
    pub fn new(search: Option<String>, platform: Option<String>, sort: Option<&str>) -> Self {
        Self {
            search: non_empty(search),
            platform: non_empty(platform),
            sort: GroupSort::from_param(sort),
        }
    }
}

/// Validated column values for an insert or full-row update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupFields {
    pub name: String,
    pub platform: String,
    pub members: String,
    pub description: String,
    pub link: String,
    pub avatar: Option<String>,
    pub vk_group_id: Option<String>,
    pub telegram_channel_id: Option<String>,
}

pub const GROUP_REQUIRED_FIELDS: &str = "Name and platform are required";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateGroupRequest {
    #[serde(default, deserialize_with = "loose_string")]
    pub name: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub platform: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub members: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub description: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub link: String,
    #[serde(default, deserialize_with = "loose_optional_string")]
    pub avatar: Option<String>,
    #[serde(default, deserialize_with = "loose_optional_string")]
    pub vk_group_id: Option<String>,
    #[serde(default, deserialize_with = "loose_optional_string")]
    pub telegram_channel_id: Option<String>,
}

impl CreateGroupRequest {
    /// Check required fields and normalize optional ones
    pub fn validate(self) -> Result<GroupFields, DirectoryError> {
        let name = self.name.trim().to_string();
        let platform = self.platform.trim().to_string();

        if name.is_empty() || platform.is_empty() {
            return Err(DirectoryError::validation(GROUP_REQUIRED_FIELDS));
        }

        Ok(GroupFields {
            name,
            platform,
            members: self.members.trim().to_string(),
            description: self.description,
            link: self.link.trim().to_string(),
            avatar: non_empty(self.avatar),
            vk_group_id: non_empty(self.vk_group_id),
            telegram_channel_id: non_empty(self.telegram_channel_id),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateGroupRequest {
    #[serde(rename = "groupId", default, deserialize_with = "loose_optional_i64")]
    pub group_id: Option<i64>,
    #[serde(flatten)]
    pub fields: CreateGroupRequest,
}

/// A validated full-row update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupUpdate {
    pub id: i64,
    pub fields: GroupFields,
}

impl UpdateGroupRequest {
    pub fn validate(self) -> Result<GroupUpdate, DirectoryError> {
        let id = self
            .group_id
            .ok_or_else(|| DirectoryError::validation("groupId is required"))?;
        Ok(GroupUpdate {
            id,
            fields: self.fields.validate()?,
        })
    }
}
