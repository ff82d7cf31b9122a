//! Bookmark entity representing a saved URL with metadata.

use chrono::{DateTime, Utc};

use crate::domain::entities::User;

/// A bookmarked URL with user-provided and service-derived metadata.
///
/// `owner` is hydrated from a join where available; repository lookups scoped
/// to a single user may leave it `None`.
#[derive(Debug, Clone)]
pub struct Bookmark {
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
    pub owner: Option<User>,
    pub date_added: DateTime<Utc>,
    pub date_modified: DateTime<Utc>,
}

impl Bookmark {
    /// Returns true iff the bookmark has an owner and it is the acting user.
    ///
    /// False when the owner is missing, the acting user is missing, or the
    /// ids differ.
    pub fn is_owned_by(&self, acting_user: Option<&User>) -> bool {
        match (&self.owner, acting_user) {
            (Some(owner), Some(user)) => owner.id == user.id,
            _ => false,
        }
    }

    /// Overwrites the fields present in `patch`, leaving the rest untouched.
    ///
    /// Archive state is not part of [`BookmarkPatch`]; it changes only
    /// through the archive operations.
    pub fn apply(&mut self, patch: BookmarkPatch) {
        if let Some(url) = patch.url {
            self.url = url;
        }
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(unread) = patch.unread {
            self.unread = unread;
        }
        if let Some(shared) = patch.shared {
            self.shared = shared;
        }
    }
}

/// Input data for creating a new bookmark.
///
/// Carries only the client-settable fields; owner, website metadata, favicon,
/// and timestamps are populated by the service and persistence layers.
#[derive(Debug, Clone, Default)]
pub struct NewBookmark {
    pub url: String,
    pub title: String,
    pub description: String,
    pub is_archived: bool,
    pub unread: bool,
    pub shared: bool,
}

/// Partial update for an existing bookmark.
///
/// `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct BookmarkPatch {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub unread: Option<bool>,
    pub shared: Option<bool>,
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
            title: String::new(),
            description: String::new(),
            website_title: None,
            website_description: None,
            web_archive_snapshot_url: String::new(),
            favicon_file: String::new(),
            is_archived: false,
            unread: false,
            shared: false,
            owner,
            date_added: now,
            date_modified: now,
        }
    }

    #[test]
    fn test_is_owned_by_matching_owner() {
        let bookmark = test_bookmark(Some(test_user(1, "alice")));
        let acting = test_user(1, "alice");

        assert!(bookmark.is_owned_by(Some(&acting)));
    }

    #[test]
    fn test_is_owned_by_different_owner() {
        let bookmark = test_bookmark(Some(test_user(1, "alice")));
        let acting = test_user(2, "bob");

        assert!(!bookmark.is_owned_by(Some(&acting)));
    }

    #[test]
    fn test_is_owned_by_no_owner() {
        let bookmark = test_bookmark(None);
        let acting = test_user(1, "alice");

        assert!(!bookmark.is_owned_by(Some(&acting)));
    }

    #[test]
    fn test_is_owned_by_no_acting_user() {
        let bookmark = test_bookmark(Some(test_user(1, "alice")));

        assert!(!bookmark.is_owned_by(None));
    }

    #[test]
    fn test_apply_overwrites_only_present_fields() {
        let mut bookmark = test_bookmark(None);
        bookmark.url = "a".to_string();
        bookmark.shared = false;

        bookmark.apply(BookmarkPatch {
            shared: Some(true),
            ..BookmarkPatch::default()
        });

        assert_eq!(bookmark.url, "a");
        assert!(bookmark.shared);
    }

    #[test]
    fn test_apply_full_patch() {
        let mut bookmark = test_bookmark(None);

        bookmark.apply(BookmarkPatch {
            url: Some("https://new.example.com".to_string()),
            title: Some("New title".to_string()),
            description: Some("New description".to_string()),
            unread: Some(true),
            shared: Some(true),
        });

        assert_eq!(bookmark.url, "https://new.example.com");
        assert_eq!(bookmark.title, "New title");
        assert_eq!(bookmark.description, "New description");
        assert!(bookmark.unread);
        assert!(bookmark.shared);
    }

    #[test]
    fn test_apply_empty_patch_is_noop() {
        let mut bookmark = test_bookmark(None);
        bookmark.title = "Kept".to_string();

        bookmark.apply(BookmarkPatch::default());

        assert_eq!(bookmark.title, "Kept");
        assert!(!bookmark.unread);
    }

    #[test]
    fn test_new_bookmark_defaults() {
        let draft = NewBookmark {
            url: "https://example.com".to_string(),
            ..NewBookmark::default()
        };

        assert_eq!(draft.title, "");
        assert_eq!(draft.description, "");
        assert!(!draft.is_archived);
        assert!(!draft.unread);
        assert!(!draft.shared);
    }
}
