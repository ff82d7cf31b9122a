//! Authentication service resolving API tokens to acting users.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::User;
use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Service for authenticating API requests via Bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before
/// storage and comparison. An attacker with read-only access to the database
/// cannot verify or forge tokens without the server-side secret.
pub struct AuthService<T: TokenRepository, U: UserRepository> {
    token_repository: Arc<T>,
    user_repository: Arc<U>,
    signing_secret: String,
}

impl<T: TokenRepository, U: UserRepository> AuthService<T, U> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `token_repository` - token repository for DB operations
    /// - `user_repository` - user lookup for token owners
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(token_repository: Arc<T>, user_repository: Arc<U>, signing_secret: String) -> Self {
        Self {
            token_repository,
            user_repository,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Authenticates a raw token and returns the acting user.
    ///
    /// On successful authentication, updates the `last_used` timestamp for
    /// monitoring and audit purposes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if:
    /// - Token hash does not match any stored credentials
    /// - Token has been revoked
    /// - The token's owner no longer exists
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let token_hash = self.hash_token(token);

        let api_token = self
            .token_repository
            .find_by_hash(&token_hash)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("Unauthorized", json!({"reason": "Invalid token"}))
            })?;

        if api_token.revoked_at.is_some() {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Token has been revoked"}),
            ));
        }

        let _ = self.token_repository.update_last_used(&token_hash).await;

        self.user_repository
            .find_by_id(api_token.user_id)
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("Unauthorized", json!({"reason": "Unknown token owner"}))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{ApiToken, MockTokenRepository, MockUserRepository};
    use chrono::Utc;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    fn compute_expected_hash(token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(test_secret().as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn stored_token(user_id: i64, hash: &str, revoked: bool) -> ApiToken {
        ApiToken {
            id: 1,
            user_id,
            name: "Test token".to_string(),
            token_hash: hash.to_string(),
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: revoked.then(Utc::now),
        }
    }

    #[tokio::test]
    async fn test_authenticate_returns_acting_user() {
        let mut mock_tokens = MockTokenRepository::new();
        let mut mock_users = MockUserRepository::new();

        let token = "valid-token";
        let expected_hash = compute_expected_hash(token);
        let stored = stored_token(42, &expected_hash, false);

        mock_tokens
            .expect_find_by_hash()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        mock_tokens
            .expect_update_last_used()
            .times(1)
            .returning(|_| Ok(()));

        mock_users
            .expect_find_by_id()
            .withf(|id| *id == 42)
            .times(1)
            .returning(|id| Ok(Some(User::new(id, "alice".to_string(), Utc::now()))));

        let service = AuthService::new(Arc::new(mock_tokens), Arc::new(mock_users), test_secret());

        let result = service.authenticate(token).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().id, 42);
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut mock_tokens = MockTokenRepository::new();
        let mock_users = MockUserRepository::new();

        mock_tokens
            .expect_find_by_hash()
            .times(1)
            .returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(mock_tokens), Arc::new(mock_users), test_secret());

        let result = service.authenticate("invalid-token").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_revoked_token() {
        let mut mock_tokens = MockTokenRepository::new();
        let mock_users = MockUserRepository::new();

        let token = "revoked-token";
        let hash = compute_expected_hash(token);
        let stored = stored_token(42, &hash, true);

        mock_tokens
            .expect_find_by_hash()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        mock_tokens.expect_update_last_used().times(0);

        let service = AuthService::new(Arc::new(mock_tokens), Arc::new(mock_users), test_secret());

        let result = service.authenticate(token).await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_hash_token_consistency() {
        let service = AuthService::new(
            Arc::new(MockTokenRepository::new()),
            Arc::new(MockUserRepository::new()),
            test_secret(),
        );

        let hash1 = service.hash_token("test-token");
        let hash2 = service.hash_token("test-token");

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[tokio::test]
    async fn test_hash_token_secret_matters() {
        let svc1 = AuthService::new(
            Arc::new(MockTokenRepository::new()),
            Arc::new(MockUserRepository::new()),
            "secret-a".to_string(),
        );
        let svc2 = AuthService::new(
            Arc::new(MockTokenRepository::new()),
            Arc::new(MockUserRepository::new()),
            "secret-b".to_string(),
        );

        // Same token, different secrets → different hashes
        assert_ne!(svc1.hash_token("token"), svc2.hash_token("token"));
    }
}
