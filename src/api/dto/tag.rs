//! DTOs for tag endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::Tag;

/// Compiled regex for tag name validation: no whitespace allowed.
static TAG_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\S+$").unwrap());

/// Request body for `POST /api/tags`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTagRequest {
    /// Tag name; creation is idempotent per user, matched case-insensitively.
    #[validate(required(message = "Tag name is required"))]
    #[validate(length(min = 1, max = 64, message = "Tag name must be 1-64 characters"))]
    #[validate(regex(path = "*TAG_NAME_REGEX", message = "Tag names cannot contain whitespace"))]
    pub name: Option<String>,
}

/// JSON representation of a tag.
#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
    pub date_added: DateTime<Utc>,
}

impl From<&Tag> for TagResponse {
    fn from(tag: &Tag) -> Self {
        TagResponse {
            id: tag.id,
            name: tag.name.clone(),
            date_added: tag.date_added,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: Option<&str>) -> CreateTagRequest {
        CreateTagRequest {
            name: name.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_valid_name() {
        assert!(request(Some("rust")).validate().is_ok());
    }

    #[test]
    fn test_missing_name_is_rejected() {
        assert!(request(None).validate().is_err());
    }

    #[test]
    fn test_blank_name_is_rejected() {
        assert!(request(Some("")).validate().is_err());
    }

    #[test]
    fn test_whitespace_in_name_is_rejected() {
        assert!(request(Some("two words")).validate().is_err());
    }

    #[test]
    fn test_overlong_name_is_rejected() {
        assert!(request(Some(&"x".repeat(65))).validate().is_err());
    }

    #[test]
    fn test_response_exposes_read_only_date_added() {
        let tag = Tag::new(3, "rust".to_string(), 1, Utc::now());

        let json = serde_json::to_value(TagResponse::from(&tag)).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["name"], "rust");
        assert!(json.get("date_added").is_some());
        // owner_id is internal and never serialized
        assert!(json.get("owner_id").is_none());
    }
}
