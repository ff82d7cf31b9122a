//! Tag entity for bookmark categorization.

use chrono::{DateTime, Utc};

/// A named label attached to bookmarks.
///
/// Tag names are unique per owner, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub owner_id: i64,
    pub date_added: DateTime<Utc>,
}

impl Tag {
    /// Creates a new Tag instance.
    pub fn new(id: i64, name: String, owner_id: i64, date_added: DateTime<Utc>) -> Self {
        Self {
            id,
            name,
            owner_id,
            date_added,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_creation() {
        let now = Utc::now();
        let tag = Tag::new(3, "rust".to_string(), 1, now);

        assert_eq!(tag.id, 3);
        assert_eq!(tag.name, "rust");
        assert_eq!(tag.owner_id, 1);
        assert_eq!(tag.date_added, now);
    }
}
