//! Review repository implementation

use sqlx::PgPool;
use crate::models::review::{NewReview, ReviewWithGroup};
use crate::utils::errors::DirectoryError;

/// Number of reviews returned when no group is selected
pub const RECENT_REVIEWS_LIMIT: i64 = 50;

/// PostgreSQL `foreign_key_violation`
const FOREIGN_KEY_VIOLATION: &str = "23503";

#[derive(Debug, Clone)]
pub struct ReviewRepository {
    pool: PgPool,
}

impl ReviewRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All reviews of a group, newest first
    pub async fn list_for_group(&self, group_id: i64) -> Result<Vec<ReviewWithGroup>, DirectoryError> {
        let reviews = sqlx::query_as::<_, ReviewWithGroup>(
            r#"
            SELECT r.id, r.group_id, r.user_name, r.user_avatar, r.rating, r.text, r.created_at,
                   g.name AS group_name
            FROM reviews r
            JOIN groups g ON r.group_id = g.id
            WHERE r.group_id = $1
            ORDER BY r.created_at DESC, r.id DESC
            "#
        )
        .bind(group_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    /// Most recent reviews across all groups
    pub async fn list_recent(&self) -> Result<Vec<ReviewWithGroup>, DirectoryError> {
        let reviews = sqlx::query_as::<_, ReviewWithGroup>(
            r#"
            SELECT r.id, r.group_id, r.user_name, r.user_avatar, r.rating, r.text, r.created_at,
                   g.name AS group_name
            FROM reviews r
            JOIN groups g ON r.group_id = g.id
            ORDER BY r.created_at DESC, r.id DESC
            LIMIT $1
            "#
        )
        .bind(RECENT_REVIEWS_LIMIT)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }

    /// Insert a review and return its id
    pub async fn create(&self, review: &NewReview) -> Result<i64, DirectoryError> {
        let mut tx = self.pool.begin().await?;

        let inserted: Result<(i64,), sqlx::Error> = sqlx::query_as(
            r#"
            INSERT INTO reviews (group_id, user_name, user_avatar, rating, text)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#
        )
        .bind(review.group_id)
        .bind(&review.user_name)
        .bind(review.user_avatar.as_deref())
        .bind(review.rating)
        .bind(&review.text)
        .fetch_one(&mut *tx)
        .await;

        let (id,) = match inserted {
            Ok(row) => row,
            Err(e) if is_foreign_key_violation(&e) => {
                return Err(DirectoryError::GroupNotFound { group_id: review.group_id });
            }
            Err(e) => return Err(e.into()),
        };

        tx.commit().await?;
        Ok(id)
    }
}

fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(|db| db.code())
        .map_or(false, |code| code == FOREIGN_KEY_VIOLATION)
}
