//! Repository trait for bookmark data access.

use std::collections::HashMap;

use crate::domain::entities::{Bookmark, NewBookmark, Tag};
use crate::error::AppError;
use async_trait::async_trait;

/// Filter and pagination options for bookmark listings.
#[derive(Debug, Clone)]
pub struct BookmarkFilter {
    pub archived: bool,
    pub query: Option<String>,
    pub offset: i64,
    pub limit: i64,
}

impl BookmarkFilter {
    /// Creates a filter for non-archived bookmarks with the given page window.
    pub fn new(offset: i64, limit: i64) -> Self {
        Self {
            archived: false,
            query: None,
            offset,
            limit,
        }
    }

    /// Restricts the listing to archived or non-archived bookmarks.
    pub fn archived(mut self, archived: bool) -> Self {
        self.archived = archived;
        self
    }

    /// Adds a case-insensitive search over url, title, and description.
    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query;
        self
    }
}

/// Repository interface for managing bookmarks and their tag associations.
///
/// All operations are scoped to an owner; a bookmark is only visible to the
/// user that created it.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgBookmarkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Inserts a new bookmark owned by `owner_id`.
    ///
    /// `favicon_file` is the derived favicon file name, empty when the URL
    /// has no host. Timestamps are assigned by the database.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the owner already has a bookmark for
    /// the URL. Returns [`AppError::Internal`] on database errors.
    async fn insert(
        &self,
        draft: NewBookmark,
        favicon_file: &str,
        owner_id: i64,
    ) -> Result<Bookmark, AppError>;

    /// Persists the client-settable fields of an existing bookmark and bumps
    /// `date_modified`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the bookmark no longer exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn save(&self, bookmark: &Bookmark) -> Result<Bookmark, AppError>;

    /// Finds a bookmark by id, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64, owner_id: i64) -> Result<Option<Bookmark>, AppError>;

    /// Finds a bookmark by exact URL, scoped to its owner.
    ///
    /// Used to fold repeated saves of the same URL into an update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_url(&self, url: &str, owner_id: i64) -> Result<Option<Bookmark>, AppError>;

    /// Lists bookmarks for an owner, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, owner_id: i64, filter: BookmarkFilter) -> Result<Vec<Bookmark>, AppError>;

    /// Counts bookmarks matching the filter (ignoring its page window).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, owner_id: i64, filter: &BookmarkFilter) -> Result<i64, AppError>;

    /// Deletes a bookmark.
    ///
    /// Returns `Ok(true)` if the bookmark was found and deleted, `Ok(false)`
    /// if not found.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64, owner_id: i64) -> Result<bool, AppError>;

    /// Sets the archived flag on a bookmark.
    ///
    /// Returns `Ok(true)` if the bookmark was found, `Ok(false)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_archived(&self, id: i64, owner_id: i64, archived: bool)
    -> Result<bool, AppError>;

    /// Replaces the tag set of a bookmark atomically.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn set_tags(&self, bookmark_id: i64, tag_ids: &[i64]) -> Result<(), AppError>;

    /// Loads the tags of a single bookmark, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn tags_for_bookmark(&self, bookmark_id: i64) -> Result<Vec<Tag>, AppError>;

    /// Loads the tags of many bookmarks in one query, keyed by bookmark id.
    ///
    /// List serialization calls this once per page so the number of tag
    /// lookups stays constant regardless of page size.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn tags_for_bookmarks(
        &self,
        bookmark_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Tag>>, AppError>;
}
