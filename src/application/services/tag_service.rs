//! Tag lookup and creation service.

use std::sync::Arc;

use crate::domain::entities::{Tag, User};
use crate::domain::repositories::TagRepository;
use crate::error::AppError;
use serde_json::json;

/// Service for per-user tag management.
pub struct TagService<T: TagRepository> {
    tag_repository: Arc<T>,
}

impl<T: TagRepository> TagService<T> {
    /// Creates a new tag service.
    pub fn new(tag_repository: Arc<T>) -> Self {
        Self { tag_repository }
    }

    /// Returns the acting user's tag with the given name, creating it when
    /// it does not exist yet.
    ///
    /// Lookup is case-insensitive; re-submitting an existing name returns the
    /// stored tag unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_or_create_tag(&self, name: &str, user: &User) -> Result<Tag, AppError> {
        self.tag_repository.get_or_create(name, user.id).await
    }

    /// Retrieves a tag by id for the acting user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no tag matches the id for this user.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_tag(&self, id: i64, user: &User) -> Result<Tag, AppError> {
        self.tag_repository
            .find_by_id(id, user.id)
            .await?
            .ok_or_else(|| AppError::not_found("Tag not found", json!({ "id": id })))
    }

    /// Lists a page of the acting user's tags, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_tags(
        &self,
        user: &User,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<Tag>, AppError> {
        self.tag_repository.list(user.id, offset, limit).await
    }

    /// Counts the acting user's tags.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_tags(&self, user: &User) -> Result<i64, AppError> {
        self.tag_repository.count(user.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockTagRepository;
    use chrono::Utc;

    fn test_user(id: i64) -> User {
        User::new(id, format!("user{id}"), Utc::now())
    }

    #[tokio::test]
    async fn test_get_or_create_scopes_to_acting_user() {
        let mut mock_repo = MockTagRepository::new();

        mock_repo
            .expect_get_or_create()
            .withf(|name, owner_id| name == "rust" && *owner_id == 3)
            .times(1)
            .returning(|name, owner_id| Ok(Tag::new(1, name.to_string(), owner_id, Utc::now())));

        let service = TagService::new(Arc::new(mock_repo));

        let result = service.get_or_create_tag("rust", &test_user(3)).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().name, "rust");
    }

    #[tokio::test]
    async fn test_get_tag_not_found() {
        let mut mock_repo = MockTagRepository::new();

        mock_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = TagService::new(Arc::new(mock_repo));

        let result = service.get_tag(404, &test_user(1)).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_tags_passes_page_window() {
        let mut mock_repo = MockTagRepository::new();

        mock_repo
            .expect_list()
            .withf(|owner_id, offset, limit| *owner_id == 1 && *offset == 50 && *limit == 25)
            .times(1)
            .returning(|_, _, _| Ok(Vec::new()));

        let service = TagService::new(Arc::new(mock_repo));

        let result = service.list_tags(&test_user(1), 50, 25).await;

        assert!(result.is_ok());
    }
}
