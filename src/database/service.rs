//! Database service layer
//!
//! This module provides a high-level interface to database operations

use crate::database::{health_check, DatabasePool, GroupRepository, ReviewRepository};
use crate::models::*;
use crate::utils::errors::DirectoryError;
use crate::utils::logging::{log_group_event, log_review_created};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub groups: GroupRepository,
    pub reviews: ReviewRepository,
    pool: DatabasePool,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            groups: GroupRepository::new(pool.clone()),
            reviews: ReviewRepository::new(pool.clone()),
            pool,
        }
    }

    /// Validate and insert a new group
    pub async fn create_group(&self, request: CreateGroupRequest) -> Result<i64, DirectoryError> {
        let fields = request.validate()?;
        let group_id = self.groups.create(&fields).await?;

        log_group_event(group_id, "created", Some(&fields.platform));
        Ok(group_id)
    }

    /// Validate and apply a full-row group update
    pub async fn update_group(&self, request: UpdateGroupRequest) -> Result<i64, DirectoryError> {
        let update = request.validate()?;

        if !self.groups.update(&update).await? {
            return Err(DirectoryError::GroupNotFound { group_id: update.id });
        }

        log_group_event(update.id, "updated", None);
        Ok(update.id)
    }

    /// Load analytics identifiers, failing with `GroupNotFound` for unknown ids
    pub async fn analytics_source(&self, group_id: i64) -> Result<AnalyticsSource, DirectoryError> {
        self.groups
            .find_analytics_source(group_id)
            .await?
            .ok_or(DirectoryError::GroupNotFound { group_id })
    }

    /// Validate and insert a review
    pub async fn create_review(&self, request: CreateReviewRequest) -> Result<i64, DirectoryError> {
        let review = request.validate()?;
        let review_id = self.reviews.create(&review).await?;

        log_review_created(review_id, review.group_id, review.rating);
        Ok(review_id)
    }

    /// Check that the database answers queries
    pub async fn health_check(&self) -> Result<(), DirectoryError> {
        health_check(&self.pool).await
    }
}
