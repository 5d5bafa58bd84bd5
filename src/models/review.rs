//! Review model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::utils::errors::DirectoryError;
use crate::utils::helpers::{loose_optional_i64, loose_optional_string, loose_string, non_empty};

/// Lowest accepted star rating
pub const MIN_RATING: i64 = 1;
/// Highest accepted star rating
pub const MAX_RATING: i64 = 5;

pub const REVIEW_REQUIRED_FIELDS: &str = "group_id, user_name, rating and text are required";
pub const REVIEW_RATING_RANGE: &str = "Rating must be between 1 and 5";

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Review {
    pub id: i64,
    pub group_id: i64,
    pub user_name: String,
    pub user_avatar: Option<String>,
    pub rating: i32,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A review joined with the name of the group it belongs to
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReviewWithGroup {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub review: Review,
    pub group_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateReviewRequest {
    #[serde(default, deserialize_with = "loose_optional_i64")]
    pub group_id: Option<i64>,
    #[serde(default, deserialize_with = "loose_string")]
    pub user_name: String,
    #[serde(default, deserialize_with = "loose_optional_string")]
    pub user_avatar: Option<String>,
    #[serde(default, deserialize_with = "loose_optional_i64")]
    pub rating: Option<i64>,
    #[serde(default, deserialize_with = "loose_string")]
    pub text: String,
}

/// A review that passed validation and is ready to insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReview {
    pub group_id: i64,
    pub user_name: String,
    pub user_avatar: Option<String>,
    pub rating: i32,
    pub text: String,
}

impl CreateReviewRequest {
    /// A zero group id or rating counts as missing.
    pub fn validate(self) -> Result<NewReview, DirectoryError> {
        let user_name = self.user_name.trim().to_string();
        let text = self.text.trim().to_string();

        let (group_id, rating) = match (self.group_id, self.rating) {
            (Some(group_id), Some(rating))
                if group_id != 0 && rating != 0 && !user_name.is_empty() && !text.is_empty() =>
            {
                (group_id, rating)
            }
            _ => return Err(DirectoryError::validation(REVIEW_REQUIRED_FIELDS)),
        };

        if !(MIN_RATING..=MAX_RATING).contains(&rating) {
            return Err(DirectoryError::validation(REVIEW_RATING_RANGE));
        }

        Ok(NewReview {
            group_id,
            user_name,
            user_avatar: non_empty(self.user_avatar),
            rating: rating as i32,
            text,
        })
    }
}
