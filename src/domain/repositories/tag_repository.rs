//! Repository trait for tag data access.

use crate::domain::entities::Tag;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for per-user tags.
///
/// Tag names are unique per owner, matched case-insensitively.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTagRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Returns the owner's tag with the given name, creating it if absent.
    ///
    /// Matching is case-insensitive; when the name is already taken the
    /// existing tag is returned with its original casing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn get_or_create(&self, name: &str, owner_id: i64) -> Result<Tag, AppError>;

    /// Finds a tag by id, scoped to its owner.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64, owner_id: i64) -> Result<Option<Tag>, AppError>;

    /// Lists an owner's tags ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, owner_id: i64, offset: i64, limit: i64) -> Result<Vec<Tag>, AppError>;

    /// Counts an owner's tags.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, owner_id: i64) -> Result<i64, AppError>;
}
