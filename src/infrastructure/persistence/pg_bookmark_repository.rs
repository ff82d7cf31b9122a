//! PostgreSQL implementation of the bookmark repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::entities::{Bookmark, NewBookmark, Tag, User};
use crate::domain::repositories::{BookmarkFilter, BookmarkRepository};
use crate::error::AppError;
use serde_json::json;

/// Columns selected for every bookmark query, with the owner hydrated from a
/// join so a listing needs no per-row user lookup.
const BOOKMARK_COLUMNS: &str = "\
    b.id, b.url, b.title, b.description, b.website_title, b.website_description, \
    b.web_archive_snapshot_url, b.favicon_file, b.is_archived, b.unread, b.shared, \
    b.owner_id, u.username AS owner_username, u.date_joined AS owner_date_joined, \
    b.date_added, b.date_modified";

#[derive(sqlx::FromRow)]
struct BookmarkRow {
    id: i64,
    url: String,
    title: String,
    description: String,
    website_title: Option<String>,
    website_description: Option<String>,
    web_archive_snapshot_url: String,
    favicon_file: String,
    is_archived: bool,
    unread: bool,
    shared: bool,
    owner_id: i64,
    owner_username: String,
    owner_date_joined: DateTime<Utc>,
    date_added: DateTime<Utc>,
    date_modified: DateTime<Utc>,
}

impl From<BookmarkRow> for Bookmark {
    fn from(row: BookmarkRow) -> Self {
        Bookmark {
            id: row.id,
            url: row.url,
            title: row.title,
            description: row.description,
            website_title: row.website_title,
            website_description: row.website_description,
            web_archive_snapshot_url: row.web_archive_snapshot_url,
            favicon_file: row.favicon_file,
            is_archived: row.is_archived,
            unread: row.unread,
            shared: row.shared,
            owner: Some(User::new(
                row.owner_id,
                row.owner_username,
                row.owner_date_joined,
            )),
            date_added: row.date_added,
            date_modified: row.date_modified,
        }
    }
}

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

/// PostgreSQL repository for bookmark storage and retrieval.
///
/// Uses SQLx prepared statements for SQL injection protection and type safety.
pub struct PgBookmarkRepository {
    pool: Arc<PgPool>,
}

impl PgBookmarkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookmarkRepository for PgBookmarkRepository {
    async fn insert(
        &self,
        draft: NewBookmark,
        favicon_file: &str,
        owner_id: i64,
    ) -> Result<Bookmark, AppError> {
        let sql = format!(
            r#"
        WITH inserted AS (
            INSERT INTO bookmarks
                (owner_id, url, title, description, favicon_file, is_archived, unread, shared)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
        )
        SELECT {}
        FROM inserted b
        JOIN users u ON u.id = b.owner_id
        "#,
            BOOKMARK_COLUMNS
        );

        let row: BookmarkRow = sqlx::query_as(&sql)
            .bind(owner_id)
            .bind(&draft.url)
            .bind(&draft.title)
            .bind(&draft.description)
            .bind(favicon_file)
            .bind(draft.is_archived)
            .bind(draft.unread)
            .bind(draft.shared)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn save(&self, bookmark: &Bookmark) -> Result<Bookmark, AppError> {
        let sql = format!(
            r#"
        WITH updated AS (
            UPDATE bookmarks
            SET url = $2,
                title = $3,
                description = $4,
                is_archived = $5,
                unread = $6,
                shared = $7,
                date_modified = now()
            WHERE id = $1
            RETURNING *
        )
        SELECT {}
        FROM updated b
        JOIN users u ON u.id = b.owner_id
        "#,
            BOOKMARK_COLUMNS
        );

        let row: Option<BookmarkRow> = sqlx::query_as(&sql)
            .bind(bookmark.id)
            .bind(&bookmark.url)
            .bind(&bookmark.title)
            .bind(&bookmark.description)
            .bind(bookmark.is_archived)
            .bind(bookmark.unread)
            .bind(bookmark.shared)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Bookmark::from).ok_or_else(|| {
            AppError::not_found("Bookmark not found", json!({ "id": bookmark.id }))
        })
    }

    async fn find_by_id(&self, id: i64, owner_id: i64) -> Result<Option<Bookmark>, AppError> {
        let sql = format!(
            "SELECT {} FROM bookmarks b JOIN users u ON u.id = b.owner_id \
             WHERE b.id = $1 AND b.owner_id = $2",
            BOOKMARK_COLUMNS
        );

        let row: Option<BookmarkRow> = sqlx::query_as(&sql)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Bookmark::from))
    }

    async fn find_by_url(&self, url: &str, owner_id: i64) -> Result<Option<Bookmark>, AppError> {
        let sql = format!(
            "SELECT {} FROM bookmarks b JOIN users u ON u.id = b.owner_id \
             WHERE b.url = $1 AND b.owner_id = $2",
            BOOKMARK_COLUMNS
        );

        let row: Option<BookmarkRow> = sqlx::query_as(&sql)
            .bind(url)
            .bind(owner_id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Bookmark::from))
    }

    async fn list(&self, owner_id: i64, filter: BookmarkFilter) -> Result<Vec<Bookmark>, AppError> {
        let sql = format!(
            r#"
        SELECT {}
        FROM bookmarks b
        JOIN users u ON u.id = b.owner_id
        WHERE b.owner_id = $1
          AND b.is_archived = $2
          AND ($3::text IS NULL
               OR b.url ILIKE '%' || $3 || '%'
               OR b.title ILIKE '%' || $3 || '%'
               OR b.description ILIKE '%' || $3 || '%')
        ORDER BY b.date_added DESC
        LIMIT $4 OFFSET $5
        "#,
            BOOKMARK_COLUMNS
        );

        let rows: Vec<BookmarkRow> = sqlx::query_as(&sql)
            .bind(owner_id)
            .bind(filter.archived)
            .bind(&filter.query)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(Bookmark::from).collect())
    }

    async fn count(&self, owner_id: i64, filter: &BookmarkFilter) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
        SELECT COUNT(*)
        FROM bookmarks b
        WHERE b.owner_id = $1
          AND b.is_archived = $2
          AND ($3::text IS NULL
               OR b.url ILIKE '%' || $3 || '%'
               OR b.title ILIKE '%' || $3 || '%'
               OR b.description ILIKE '%' || $3 || '%')
        "#,
        )
        .bind(owner_id)
        .bind(filter.archived)
        .bind(&filter.query)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM bookmarks WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_archived(
        &self,
        id: i64,
        owner_id: i64,
        archived: bool,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE bookmarks SET is_archived = $3, date_modified = now() \
             WHERE id = $1 AND owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .bind(archived)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_tags(&self, bookmark_id: i64, tag_ids: &[i64]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM bookmark_tags WHERE bookmark_id = $1")
            .bind(bookmark_id)
            .execute(&mut *tx)
            .await?;

        if !tag_ids.is_empty() {
            sqlx::query(
                "INSERT INTO bookmark_tags (bookmark_id, tag_id) \
                 SELECT $1, unnest($2::bigint[]) \
                 ON CONFLICT DO NOTHING",
            )
            .bind(bookmark_id)
            .bind(tag_ids)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    async fn tags_for_bookmark(&self, bookmark_id: i64) -> Result<Vec<Tag>, AppError> {
        let rows: Vec<TagRow> = sqlx::query_as(
            r#"
        SELECT t.id, t.name, t.owner_id, t.date_added
        FROM bookmark_tags bt
        JOIN tags t ON t.id = bt.tag_id
        WHERE bt.bookmark_id = $1
        ORDER BY t.name
        "#,
        )
        .bind(bookmark_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }

    async fn tags_for_bookmarks(
        &self,
        bookmark_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Tag>>, AppError> {
        if bookmark_ids.is_empty() {
            return Ok(HashMap::new());
        }

        #[derive(sqlx::FromRow)]
        struct BookmarkTagRow {
            bookmark_id: i64,
            id: i64,
            name: String,
            owner_id: i64,
            date_added: DateTime<Utc>,
        }

        let rows: Vec<BookmarkTagRow> = sqlx::query_as(
            r#"
        SELECT bt.bookmark_id, t.id, t.name, t.owner_id, t.date_added
        FROM bookmark_tags bt
        JOIN tags t ON t.id = bt.tag_id
        WHERE bt.bookmark_id = ANY($1)
        ORDER BY t.name
        "#,
        )
        .bind(bookmark_ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        let mut tags_by_bookmark: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in rows {
            tags_by_bookmark
                .entry(row.bookmark_id)
                .or_default()
                .push(Tag::new(row.id, row.name, row.owner_id, row.date_added));
        }

        Ok(tags_by_bookmark)
    }
}
