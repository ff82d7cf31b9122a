//! Bookmark creation, update, and listing service.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::entities::{Bookmark, NewBookmark, Tag, User};
use crate::domain::repositories::{BookmarkFilter, BookmarkRepository, TagRepository};
use crate::error::AppError;
use crate::utils::favicon::favicon_file_name;
use crate::utils::tag_string::parse_tag_string;
use serde_json::json;

/// Service for creating, updating, and querying bookmarks.
///
/// Owns the persistence side effects of bookmark mutations: URL deduplication
/// per owner, favicon file naming, and tag-set resolution from the canonical
/// tag string.
pub struct BookmarkService<B: BookmarkRepository, T: TagRepository> {
    bookmark_repository: Arc<B>,
    tag_repository: Arc<T>,
}

impl<B: BookmarkRepository, T: TagRepository> BookmarkService<B, T> {
    /// Creates a new bookmark service.
    pub fn new(bookmark_repository: Arc<B>, tag_repository: Arc<T>) -> Self {
        Self {
            bookmark_repository,
            tag_repository,
        }
    }

    /// Creates a bookmark for the acting user.
    ///
    /// # Deduplication
    ///
    /// If the user already has a bookmark for the draft's URL, the draft's
    /// fields are merged onto the existing record and the update path runs
    /// instead; no duplicate URL rows are created.
    ///
    /// # Derived fields
    ///
    /// `favicon_file` is derived from the URL host; owner and timestamps are
    /// assigned by the persistence layer. The tag string is resolved through
    /// the idempotent tag upsert and replaces the bookmark's tag set.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_bookmark(
        &self,
        draft: NewBookmark,
        tag_string: &str,
        user: &User,
    ) -> Result<Bookmark, AppError> {
        if let Some(mut existing) = self
            .bookmark_repository
            .find_by_url(&draft.url, user.id)
            .await?
        {
            existing.title = draft.title;
            existing.description = draft.description;
            existing.is_archived = draft.is_archived;
            existing.unread = draft.unread;
            existing.shared = draft.shared;
            return self.update_bookmark(existing, tag_string, user).await;
        }

        let favicon_file = favicon_file_name(&draft.url).unwrap_or_default();

        let bookmark = self
            .bookmark_repository
            .insert(draft, &favicon_file, user.id)
            .await?;

        self.assign_tags(bookmark.id, tag_string, user).await?;

        tracing::info!(bookmark_id = bookmark.id, owner_id = user.id, "Bookmark created");

        Ok(bookmark)
    }

    /// Persists field changes on an existing bookmark and replaces its tag
    /// set from the tag string.
    ///
    /// Callers that do not intend to change tags pass the tag string built
    /// from the bookmark's current tags, which re-asserts the same set.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the bookmark no longer exists.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_bookmark(
        &self,
        bookmark: Bookmark,
        tag_string: &str,
        user: &User,
    ) -> Result<Bookmark, AppError> {
        let saved = self.bookmark_repository.save(&bookmark).await?;

        self.assign_tags(saved.id, tag_string, user).await?;

        tracing::info!(bookmark_id = saved.id, owner_id = user.id, "Bookmark updated");

        Ok(saved)
    }

    /// Retrieves a bookmark by id for the acting user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no bookmark matches the id for this
    /// user. Returns [`AppError::Internal`] on database errors.
    pub async fn get_bookmark(&self, id: i64, user: &User) -> Result<Bookmark, AppError> {
        self.bookmark_repository
            .find_by_id(id, user.id)
            .await?
            .ok_or_else(|| AppError::not_found("Bookmark not found", json!({ "id": id })))
    }

    /// Lists a page of the user's bookmarks together with their tags.
    ///
    /// Tags for the whole page are loaded with a single batched repository
    /// call, keyed by bookmark id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_bookmarks(
        &self,
        user: &User,
        filter: BookmarkFilter,
    ) -> Result<(Vec<Bookmark>, HashMap<i64, Vec<Tag>>), AppError> {
        let bookmarks = self.bookmark_repository.list(user.id, filter).await?;

        let ids: Vec<i64> = bookmarks.iter().map(|b| b.id).collect();
        let tags_by_bookmark = self.bookmark_repository.tags_for_bookmarks(&ids).await?;

        Ok((bookmarks, tags_by_bookmark))
    }

    /// Counts the user's bookmarks matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn count_bookmarks(
        &self,
        user: &User,
        filter: &BookmarkFilter,
    ) -> Result<i64, AppError> {
        self.bookmark_repository.count(user.id, filter).await
    }

    /// Loads the tags of a single bookmark.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn bookmark_tags(&self, bookmark_id: i64) -> Result<Vec<Tag>, AppError> {
        self.bookmark_repository.tags_for_bookmark(bookmark_id).await
    }

    /// Deletes a bookmark.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no bookmark matches the id for this
    /// user. Returns [`AppError::Internal`] on database errors.
    pub async fn delete_bookmark(&self, id: i64, user: &User) -> Result<(), AppError> {
        let deleted = self.bookmark_repository.delete(id, user.id).await?;

        if !deleted {
            return Err(AppError::not_found("Bookmark not found", json!({ "id": id })));
        }

        tracing::info!(bookmark_id = id, owner_id = user.id, "Bookmark deleted");

        Ok(())
    }

    /// Moves a bookmark to the archive.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no bookmark matches the id for this
    /// user. Returns [`AppError::Internal`] on database errors.
    pub async fn archive_bookmark(&self, id: i64, user: &User) -> Result<(), AppError> {
        self.set_archived(id, user, true).await
    }

    /// Restores a bookmark from the archive.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no bookmark matches the id for this
    /// user. Returns [`AppError::Internal`] on database errors.
    pub async fn unarchive_bookmark(&self, id: i64, user: &User) -> Result<(), AppError> {
        self.set_archived(id, user, false).await
    }

    async fn set_archived(&self, id: i64, user: &User, archived: bool) -> Result<(), AppError> {
        let found = self
            .bookmark_repository
            .set_archived(id, user.id, archived)
            .await?;

        if !found {
            return Err(AppError::not_found("Bookmark not found", json!({ "id": id })));
        }

        Ok(())
    }

    /// Resolves the tag string to tag ids and replaces the bookmark's tag set.
    async fn assign_tags(
        &self,
        bookmark_id: i64,
        tag_string: &str,
        user: &User,
    ) -> Result<(), AppError> {
        let mut tag_ids = Vec::new();

        for name in parse_tag_string(tag_string) {
            let tag = self.tag_repository.get_or_create(&name, user.id).await?;
            tag_ids.push(tag.id);
        }

        self.bookmark_repository
            .set_tags(bookmark_id, &tag_ids)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockBookmarkRepository, MockTagRepository};
    use chrono::Utc;

    fn test_user(id: i64) -> User {
        User::new(id, format!("user{id}"), Utc::now())
    }

    fn test_bookmark(id: i64, url: &str, owner: &User) -> Bookmark {
        let now = Utc::now();
        Bookmark {
            id,
            url: url.to_string(),
            title: String::new(),
            description: String::new(),
            website_title: None,
            website_description: None,
            web_archive_snapshot_url: String::new(),
            favicon_file: String::new(),
            is_archived: false,
            unread: false,
            shared: false,
            owner: Some(owner.clone()),
            date_added: now,
            date_modified: now,
        }
    }

    fn test_tag(id: i64, name: &str, owner_id: i64) -> Tag {
        Tag::new(id, name.to_string(), owner_id, Utc::now())
    }

    fn test_draft(url: &str) -> NewBookmark {
        NewBookmark {
            url: url.to_string(),
            ..NewBookmark::default()
        }
    }

    #[tokio::test]
    async fn test_create_bookmark_inserts_and_assigns_tags() {
        let mut mock_bookmark_repo = MockBookmarkRepository::new();
        let mut mock_tag_repo = MockTagRepository::new();
        let user = test_user(1);

        mock_bookmark_repo
            .expect_find_by_url()
            .times(1)
            .returning(|_, _| Ok(None));

        let created = test_bookmark(10, "https://example.com", &user);
        mock_bookmark_repo
            .expect_insert()
            .withf(|_, favicon, owner_id| favicon == "example.com.png" && *owner_id == 1)
            .times(1)
            .returning(move |_, _, _| Ok(created.clone()));

        mock_tag_repo
            .expect_get_or_create()
            .withf(|name, _| name == "rust")
            .times(1)
            .returning(|_, owner_id| Ok(test_tag(5, "rust", owner_id)));
        mock_tag_repo
            .expect_get_or_create()
            .withf(|name, _| name == "web")
            .times(1)
            .returning(|_, owner_id| Ok(test_tag(6, "web", owner_id)));

        mock_bookmark_repo
            .expect_set_tags()
            .withf(|id, tag_ids| *id == 10 && *tag_ids == [5, 6])
            .times(1)
            .returning(|_, _| Ok(()));

        let service = BookmarkService::new(Arc::new(mock_bookmark_repo), Arc::new(mock_tag_repo));

        let result = service
            .create_bookmark(test_draft("https://example.com"), "rust,web", &user)
            .await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().id, 10);
    }

    #[tokio::test]
    async fn test_create_bookmark_merges_into_existing_url() {
        let mut mock_bookmark_repo = MockBookmarkRepository::new();
        let mut mock_tag_repo = MockTagRepository::new();
        let user = test_user(1);

        let existing = test_bookmark(7, "https://example.com", &user);
        mock_bookmark_repo
            .expect_find_by_url()
            .times(1)
            .returning(move |_, _| Ok(Some(existing.clone())));

        mock_bookmark_repo.expect_insert().times(0);

        mock_bookmark_repo
            .expect_save()
            .withf(|b| b.id == 7 && b.title == "Updated" && b.unread)
            .times(1)
            .returning(|b| Ok(b.clone()));

        mock_tag_repo.expect_get_or_create().times(0);
        mock_bookmark_repo
            .expect_set_tags()
            .withf(|id, tag_ids| *id == 7 && tag_ids.is_empty())
            .times(1)
            .returning(|_, _| Ok(()));

        let service = BookmarkService::new(Arc::new(mock_bookmark_repo), Arc::new(mock_tag_repo));

        let draft = NewBookmark {
            url: "https://example.com".to_string(),
            title: "Updated".to_string(),
            unread: true,
            ..NewBookmark::default()
        };

        let result = service.create_bookmark(draft, "", &user).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().id, 7);
    }

    #[tokio::test]
    async fn test_update_bookmark_saves_and_reassigns_tags() {
        let mut mock_bookmark_repo = MockBookmarkRepository::new();
        let mut mock_tag_repo = MockTagRepository::new();
        let user = test_user(1);

        mock_bookmark_repo
            .expect_save()
            .times(1)
            .returning(|b| Ok(b.clone()));

        mock_tag_repo
            .expect_get_or_create()
            .withf(|name, _| name == "keep")
            .times(1)
            .returning(|_, owner_id| Ok(test_tag(3, "keep", owner_id)));

        mock_bookmark_repo
            .expect_set_tags()
            .withf(|id, tag_ids| *id == 4 && *tag_ids == [3])
            .times(1)
            .returning(|_, _| Ok(()));

        let service = BookmarkService::new(Arc::new(mock_bookmark_repo), Arc::new(mock_tag_repo));

        let bookmark = test_bookmark(4, "https://example.com", &user);
        let result = service.update_bookmark(bookmark, "keep", &user).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_list_bookmarks_batches_tag_fetch() {
        let mut mock_bookmark_repo = MockBookmarkRepository::new();
        let mock_tag_repo = MockTagRepository::new();
        let user = test_user(1);

        let page: Vec<Bookmark> = (1..=3)
            .map(|id| test_bookmark(id, &format!("https://example.com/{id}"), &user))
            .collect();
        mock_bookmark_repo
            .expect_list()
            .times(1)
            .returning(move |_, _| Ok(page.clone()));

        // One batched call for the whole page, never one per bookmark.
        mock_bookmark_repo
            .expect_tags_for_bookmarks()
            .withf(|ids| *ids == [1, 2, 3])
            .times(1)
            .returning(|_| Ok(HashMap::new()));
        mock_bookmark_repo.expect_tags_for_bookmark().times(0);

        let service = BookmarkService::new(Arc::new(mock_bookmark_repo), Arc::new(mock_tag_repo));

        let result = service
            .list_bookmarks(&user, BookmarkFilter::new(0, 25))
            .await;

        assert!(result.is_ok());
        let (bookmarks, tags) = result.unwrap();
        assert_eq!(bookmarks.len(), 3);
        assert!(tags.is_empty());
    }

    #[tokio::test]
    async fn test_get_bookmark_not_found() {
        let mut mock_bookmark_repo = MockBookmarkRepository::new();
        let mock_tag_repo = MockTagRepository::new();

        mock_bookmark_repo
            .expect_find_by_id()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = BookmarkService::new(Arc::new(mock_bookmark_repo), Arc::new(mock_tag_repo));

        let result = service.get_bookmark(99, &test_user(1)).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_archive_bookmark_not_found() {
        let mut mock_bookmark_repo = MockBookmarkRepository::new();
        let mock_tag_repo = MockTagRepository::new();

        mock_bookmark_repo
            .expect_set_archived()
            .withf(|_, _, archived| *archived)
            .times(1)
            .returning(|_, _, _| Ok(false));

        let service = BookmarkService::new(Arc::new(mock_bookmark_repo), Arc::new(mock_tag_repo));

        let result = service.archive_bookmark(99, &test_user(1)).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_unarchive_bookmark_clears_flag() {
        let mut mock_bookmark_repo = MockBookmarkRepository::new();
        let mock_tag_repo = MockTagRepository::new();

        mock_bookmark_repo
            .expect_set_archived()
            .withf(|id, _, archived| *id == 5 && !*archived)
            .times(1)
            .returning(|_, _, _| Ok(true));

        let service = BookmarkService::new(Arc::new(mock_bookmark_repo), Arc::new(mock_tag_repo));

        let result = service.unarchive_bookmark(5, &test_user(1)).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_delete_bookmark_not_found() {
        let mut mock_bookmark_repo = MockBookmarkRepository::new();
        let mock_tag_repo = MockTagRepository::new();

        mock_bookmark_repo
            .expect_delete()
            .times(1)
            .returning(|_, _| Ok(false));

        let service = BookmarkService::new(Arc::new(mock_bookmark_repo), Arc::new(mock_tag_repo));

        let result = service.delete_bookmark(42, &test_user(1)).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
