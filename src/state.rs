//! Shared application state injected into all handlers.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{AuthService, BookmarkService, TagService};
use crate::infrastructure::persistence::{
    PgBookmarkRepository, PgTagRepository, PgTokenRepository, PgUserRepository,
};

/// Application-wide services and the database pool.
///
/// Cloning is cheap; services are shared behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub bookmark_service: Arc<BookmarkService<PgBookmarkRepository, PgTagRepository>>,
    pub tag_service: Arc<TagService<PgTagRepository>>,
    pub auth_service: Arc<AuthService<PgTokenRepository, PgUserRepository>>,
}

impl AppState {
    /// Wires repositories and services over the given connection pool.
    pub fn new(pool: Arc<PgPool>, token_signing_secret: String) -> Self {
        let bookmark_repository = Arc::new(PgBookmarkRepository::new(pool.clone()));
        let tag_repository = Arc::new(PgTagRepository::new(pool.clone()));
        let token_repository = Arc::new(PgTokenRepository::new(pool.clone()));
        let user_repository = Arc::new(PgUserRepository::new(pool.clone()));

        Self {
            db: pool.as_ref().clone(),
            bookmark_service: Arc::new(BookmarkService::new(
                bookmark_repository,
                tag_repository.clone(),
            )),
            tag_service: Arc::new(TagService::new(tag_repository)),
            auth_service: Arc::new(AuthService::new(
                token_repository,
                user_repository,
                token_signing_secret,
            )),
        }
    }
}
