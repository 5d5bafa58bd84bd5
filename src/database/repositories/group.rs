//! Group repository implementation

use std::time::Instant;

use sqlx::PgPool;
use crate::models::group::{AnalyticsSource, GroupFields, GroupFilter, GroupStats, GroupStatsRow, GroupUpdate, GroupWithRating};
use crate::utils::errors::DirectoryError;
use crate::utils::logging::log_database_operation;

const LIST_GROUPS_QUERY: &str = r#"
    SELECT g.id, g.name, g.platform, g.members, g.description, g.link, g.avatar,
           g.vk_group_id, g.telegram_channel_id, g.created_at,
           COALESCE(AVG(r.rating), 0)::float8 AS rating,
           COUNT(r.id) AS reviews_count
    FROM groups g
    LEFT JOIN reviews r ON r.group_id = g.id
    WHERE ($1::text IS NULL OR STRPOS(LOWER(g.name), LOWER($1)) > 0)
      AND ($2::text IS NULL OR g.platform = $2)
    GROUP BY g.id
"#;

#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List groups with their average rating and review count
    ///
    /// `search` is a case-insensitive substring match on the name and
    /// `platform` an exact match. Both are bound as parameters.
    pub async fn list(&self, filter: &GroupFilter) -> Result<Vec<GroupWithRating>, DirectoryError> {
        let started = Instant::now();
        let query = format!("{} {}", LIST_GROUPS_QUERY, filter.sort.order_clause());

        let result = sqlx::query_as::<_, GroupWithRating>(&query)
            .bind(filter.search.as_deref())
            .bind(filter.platform.as_deref())
            .fetch_all(&self.pool)
            .await;

        log_database_operation("list", "groups", started.elapsed().as_millis() as u64, result.is_ok());
        Ok(result?)
    }

    /// Rating statistics for every group, most reviewed first
    pub async fn stats(&self) -> Result<Vec<GroupStats>, DirectoryError> {
        let started = Instant::now();

        let result = sqlx::query_as::<_, GroupStatsRow>(
            r#"
            SELECT g.id, g.name, g.platform, g.avatar, g.members, g.created_at,
                   COUNT(r.id) FILTER (WHERE r.rating = 5) AS rating_5,
                   COUNT(r.id) FILTER (WHERE r.rating = 4) AS rating_4,
                   COUNT(r.id) FILTER (WHERE r.rating = 3) AS rating_3,
                   COUNT(r.id) FILTER (WHERE r.rating = 2) AS rating_2,
                   COUNT(r.id) FILTER (WHERE r.rating = 1) AS rating_1
            FROM groups g
            LEFT JOIN reviews r ON r.group_id = g.id
            GROUP BY g.id
            ORDER BY COUNT(r.id) DESC, AVG(r.rating) DESC NULLS LAST, g.id ASC
            "#
        )
        .fetch_all(&self.pool)
        .await;

        log_database_operation("stats", "groups", started.elapsed().as_millis() as u64, result.is_ok());
        Ok(result?.into_iter().map(GroupStats::from).collect())
    }

    /// Platform and external identifiers of a group
    pub async fn find_analytics_source(&self, id: i64) -> Result<Option<AnalyticsSource>, DirectoryError> {
        let source = sqlx::query_as::<_, AnalyticsSource>(
            "SELECT id, platform, vk_group_id, telegram_channel_id FROM groups WHERE id = $1"
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(source)
    }

    /// Create a new group and return its id
    pub async fn create(&self, fields: &GroupFields) -> Result<i64, DirectoryError> {
        let mut tx = self.pool.begin().await?;

        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO groups (name, platform, members, description, link, avatar, vk_group_id, telegram_channel_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#
        )
        .bind(&fields.name)
        .bind(&fields.platform)
        .bind(&fields.members)
        .bind(&fields.description)
        .bind(&fields.link)
        .bind(fields.avatar.as_deref())
        .bind(fields.vk_group_id.as_deref())
        .bind(fields.telegram_channel_id.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(id)
    }

    /// Replace every editable column of a group
    ///
    /// Returns `false` when no group has the given id.
    pub async fn update(&self, update: &GroupUpdate) -> Result<bool, DirectoryError> {
        let fields = &update.fields;
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE groups
            SET name = $2,
                platform = $3,
                avatar = $4,
                members = $5,
                description = $6,
                link = $7,
                vk_group_id = $8,
                telegram_channel_id = $9,
                updated_at = NOW()
            WHERE id = $1
            "#
        )
        .bind(update.id)
        .bind(&fields.name)
        .bind(&fields.platform)
        .bind(fields.avatar.as_deref())
        .bind(&fields.members)
        .bind(&fields.description)
        .bind(&fields.link)
        .bind(fields.vk_group_id.as_deref())
        .bind(fields.telegram_channel_id.as_deref())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }
}
