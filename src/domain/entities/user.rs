//! User entity owning bookmarks and tags.

use chrono::{DateTime, Utc};

/// An account that owns bookmarks, tags, and API tokens.
///
/// The acting user for a request is resolved from its API token and carried
/// through request extensions; ownership checks compare user ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub date_joined: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance.
    pub fn new(id: i64, username: String, date_joined: DateTime<Utc>) -> Self {
        Self {
            id,
            username,
            date_joined,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new(1, "alice".to_string(), Utc::now());

        assert_eq!(user.id, 1);
        assert_eq!(user.username, "alice");
    }
}
