//! User projection DTO.

use serde::Serialize;

use crate::domain::entities::User;

/// Read-only projection of a user for nesting in other responses.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        UserResponse {
            id: user.id,
            username: user.username.clone(),
        }
    }
}
