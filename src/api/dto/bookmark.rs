//! DTOs for bookmark endpoints.
//!
//! The request structs own the wire-level field defaults: optional text
//! fields fall back to empty strings, flags to `false`, and `tag_names` to an
//! empty list. Owner, website metadata, favicon, snapshot, and timestamp
//! fields are response-only; values sent by clients for them are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::api::dto::user::UserResponse;
use crate::domain::entities::{Bookmark, NewBookmark, User};

/// Request body for `POST /api/bookmarks`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookmarkRequest {
    /// The URL to bookmark (must be a valid URL).
    #[validate(required(message = "URL is required"))]
    #[validate(url(message = "Invalid URL format"))]
    pub url: Option<String>,

    /// Optional title; blank permitted.
    #[serde(default)]
    #[validate(length(max = 512, message = "Title must be at most 512 characters"))]
    pub title: String,

    /// Optional description; blank permitted.
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub is_archived: bool,

    #[serde(default)]
    pub unread: bool,

    #[serde(default)]
    pub shared: bool,

    /// Tag names to attach; resolved case-insensitively, created on demand.
    #[serde(default)]
    pub tag_names: Vec<String>,
}

impl CreateBookmarkRequest {
    /// Splits the validated request into the entity draft and the tag names.
    ///
    /// Callers must run [`Validate::validate`] first; `url` is defaulted, not
    /// re-checked, here.
    pub fn into_parts(self) -> (NewBookmark, Vec<String>) {
        let draft = NewBookmark {
            url: self.url.unwrap_or_default(),
            title: self.title,
            description: self.description,
            is_archived: self.is_archived,
            unread: self.unread,
            shared: self.shared,
        };

        (draft, self.tag_names)
    }
}

/// Request body for `PATCH /api/bookmarks/{id}`.
///
/// All fields are optional — only provided fields are changed. `is_archived`
/// is accepted but not applied; archive state changes go through the archive
/// endpoints.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateBookmarkRequest {
    /// New URL for this bookmark.
    #[validate(url(message = "Invalid URL format"))]
    pub url: Option<String>,

    #[validate(length(max = 512, message = "Title must be at most 512 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub is_archived: Option<bool>,

    pub unread: Option<bool>,

    pub shared: Option<bool>,

    /// Replacement tag set. Absent = keep the current tags.
    pub tag_names: Option<Vec<String>>,
}

/// JSON representation of a bookmark.
#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    pub id: i64,
    pub url: String,
    pub title: String,
    pub description: String,
    pub website_title: Option<String>,
    pub website_description: Option<String>,
    pub web_archive_snapshot_url: String,
    pub favicon_file: String,
    pub is_archived: bool,
    pub unread: bool,
    pub shared: bool,
    pub is_mine: bool,
    pub owner: Option<UserResponse>,
    pub tag_names: Vec<String>,
    pub date_added: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

impl BookmarkResponse {
    /// Maps an entity and its tag names to the wire representation.
    ///
    /// `is_mine` compares the bookmark owner against the acting user from the
    /// request context; either side may be absent.
    pub fn from_entity(
        bookmark: &Bookmark,
        tag_names: Vec<String>,
        acting_user: Option<&User>,
    ) -> Self {
        BookmarkResponse {
            id: bookmark.id,
            url: bookmark.url.clone(),
            title: bookmark.title.clone(),
            description: bookmark.description.clone(),
            website_title: bookmark.website_title.clone(),
            website_description: bookmark.website_description.clone(),
            web_archive_snapshot_url: bookmark.web_archive_snapshot_url.clone(),
            favicon_file: bookmark.favicon_file.clone(),
            is_archived: bookmark.is_archived,
            unread: bookmark.unread,
            shared: bookmark.shared,
            is_mine: bookmark.is_owned_by(acting_user),
            owner: bookmark.owner.as_ref().map(UserResponse::from),
            tag_names,
            date_added: bookmark.date_added,
            date_modified: bookmark.date_modified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_user(id: i64, username: &str) -> User {
        User::new(id, username.to_string(), Utc::now())
    }

    fn test_bookmark(owner: Option<User>) -> Bookmark {
        let now = Utc::now();
        Bookmark {
            id: 1,
            url: "https://example.com".to_string(),
            title: "Example".to_string(),
            description: String::new(),
            website_title: None,
            website_description: None,
            web_archive_snapshot_url: String::new(),
            favicon_file: "example.com.png".to_string(),
            is_archived: false,
            unread: false,
            shared: false,
            owner,
            date_added: now,
            date_modified: now,
        }
    }

    #[test]
    fn test_create_deserializes_with_defaults() {
        let payload: CreateBookmarkRequest =
            serde_json::from_str(r#"{"url": "https://example.com"}"#).unwrap();

        assert!(payload.validate().is_ok());
        assert_eq!(payload.title, "");
        assert_eq!(payload.description, "");
        assert!(!payload.is_archived);
        assert!(!payload.unread);
        assert!(!payload.shared);
        assert!(payload.tag_names.is_empty());
    }

    #[test]
    fn test_create_blank_title_and_description_permitted() {
        let payload: CreateBookmarkRequest = serde_json::from_str(
            r#"{"url": "https://example.com", "title": "", "description": ""}"#,
        )
        .unwrap();

        assert!(payload.validate().is_ok());
    }

    #[test]
    fn test_create_missing_url_fails_validation() {
        let payload: CreateBookmarkRequest = serde_json::from_str("{}").unwrap();

        let errors = payload.validate().unwrap_err();

        assert!(errors.field_errors().contains_key("url"));
    }

    #[test]
    fn test_create_invalid_url_fails_validation() {
        let payload: CreateBookmarkRequest =
            serde_json::from_str(r#"{"url": "not-a-url"}"#).unwrap();

        assert!(payload.validate().is_err());
    }

    #[test]
    fn test_create_ignores_read_only_fields() {
        // Read-only fields in the payload are dropped, not applied.
        let payload: CreateBookmarkRequest = serde_json::from_str(
            r#"{
                "url": "https://example.com",
                "is_mine": true,
                "owner": {"id": 99, "username": "mallory"},
                "favicon_file": "evil.png",
                "date_added": "2020-01-01T00:00:00Z"
            }"#,
        )
        .unwrap();

        assert!(payload.validate().is_ok());
        let (draft, _) = payload.into_parts();
        assert_eq!(draft.url, "https://example.com");
    }

    #[test]
    fn test_create_into_parts_copies_fields() {
        let payload: CreateBookmarkRequest = serde_json::from_str(
            r#"{
                "url": "https://example.com",
                "title": "Example",
                "unread": true,
                "tag_names": ["rust", "web"]
            }"#,
        )
        .unwrap();

        let (draft, tag_names) = payload.into_parts();

        assert_eq!(draft.url, "https://example.com");
        assert_eq!(draft.title, "Example");
        assert!(draft.unread);
        assert!(!draft.shared);
        assert_eq!(tag_names, vec!["rust".to_string(), "web".to_string()]);
    }

    #[test]
    fn test_update_partial_payload_leaves_other_fields_absent() {
        let payload: UpdateBookmarkRequest =
            serde_json::from_str(r#"{"shared": true}"#).unwrap();

        assert!(payload.validate().is_ok());
        assert_eq!(payload.shared, Some(true));
        assert!(payload.url.is_none());
        assert!(payload.title.is_none());
        assert!(payload.description.is_none());
        assert!(payload.unread.is_none());
        assert!(payload.tag_names.is_none());
    }

    #[test]
    fn test_update_accepts_is_archived_field() {
        let payload: UpdateBookmarkRequest =
            serde_json::from_str(r#"{"is_archived": true}"#).unwrap();

        assert_eq!(payload.is_archived, Some(true));
    }

    #[test]
    fn test_is_mine_true_for_matching_owner() {
        let bookmark = test_bookmark(Some(test_user(1, "alice")));
        let acting = test_user(1, "alice");

        let dto = BookmarkResponse::from_entity(&bookmark, Vec::new(), Some(&acting));

        assert!(dto.is_mine);
    }

    #[test]
    fn test_is_mine_false_without_acting_user() {
        let bookmark = test_bookmark(Some(test_user(1, "alice")));

        let dto = BookmarkResponse::from_entity(&bookmark, Vec::new(), None);

        assert!(!dto.is_mine);
    }

    #[test]
    fn test_is_mine_false_for_other_owner() {
        let bookmark = test_bookmark(Some(test_user(1, "alice")));
        let acting = test_user(2, "bob");

        let dto = BookmarkResponse::from_entity(&bookmark, Vec::new(), Some(&acting));

        assert!(!dto.is_mine);
    }

    #[test]
    fn test_from_entity_nests_owner_and_tags() {
        let bookmark = test_bookmark(Some(test_user(1, "alice")));

        let dto = BookmarkResponse::from_entity(
            &bookmark,
            vec!["rust".to_string(), "web".to_string()],
            None,
        );
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["owner"], serde_json::json!({"id": 1, "username": "alice"}));
        assert_eq!(json["tag_names"], serde_json::json!(["rust", "web"]));
        assert_eq!(json["favicon_file"], "example.com.png");
        assert!(json.get("date_added").is_some());
        assert!(json.get("date_modified").is_some());
    }
}
