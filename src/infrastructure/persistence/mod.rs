//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx prepared
//! statements with runtime row mapping.
//!
//! # Repositories
//!
//! - [`PgBookmarkRepository`] - Bookmark storage and tag associations
//! - [`PgTagRepository`] - Per-user tag storage with upsert semantics
//! - [`PgUserRepository`] - User accounts
//! - [`PgTokenRepository`] - API token storage and validation

pub mod pg_bookmark_repository;
pub mod pg_tag_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;

pub use pg_bookmark_repository::PgBookmarkRepository;
pub use pg_tag_repository::PgTagRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;
