//! PostgreSQL implementation of the tag repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entities::Tag;
use crate::domain::repositories::TagRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct TagRow {
    id: i64,
    name: String,
    owner_id: i64,
    date_added: DateTime<Utc>,
}

impl From<TagRow> for Tag {
    fn from(row: TagRow) -> Self {
        Tag::new(row.id, row.name, row.owner_id, row.date_added)
    }
}

/// PostgreSQL repository for per-user tags.
pub struct PgTagRepository {
    pool: Arc<PgPool>,
}

impl PgTagRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TagRepository for PgTagRepository {
    async fn get_or_create(&self, name: &str, owner_id: i64) -> Result<Tag, AppError> {
        // The no-op DO UPDATE makes the conflicting row visible to RETURNING,
        // so both branches yield the stored tag in one round trip.
        let row: TagRow = sqlx::query_as(
            r#"
        INSERT INTO tags (name, owner_id)
        VALUES ($1, $2)
        ON CONFLICT (owner_id, lower(name)) DO UPDATE SET name = tags.name
        RETURNING id, name, owner_id, date_added
        "#,
        )
        .bind(name)
        .bind(owner_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64, owner_id: i64) -> Result<Option<Tag>, AppError> {
        let row: Option<TagRow> = sqlx::query_as(
            "SELECT id, name, owner_id, date_added FROM tags WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Tag::from))
    }

    async fn list(&self, owner_id: i64, offset: i64, limit: i64) -> Result<Vec<Tag>, AppError> {
        let rows: Vec<TagRow> = sqlx::query_as(
            r#"
        SELECT id, name, owner_id, date_added
        FROM tags
        WHERE owner_id = $1
        ORDER BY name
        LIMIT $2 OFFSET $3
        "#,
        )
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }

    async fn count(&self, owner_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tags WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
