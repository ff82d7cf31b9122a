//! Repository trait definitions for the domain layer.
//!
//! This module defines the repository interfaces (traits) that abstract data
//! access operations following the Repository pattern. These traits are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for data operations
//! - Implementations live in `crate::infrastructure::persistence`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`BookmarkRepository`] - Bookmark CRUD and tag associations
//! - [`TagRepository`] - Per-user tag storage with idempotent creation
//! - [`UserRepository`] - User accounts
//! - [`TokenRepository`] - API token authentication

pub mod bookmark_repository;
pub mod tag_repository;
pub mod token_repository;
pub mod user_repository;

pub use bookmark_repository::{BookmarkFilter, BookmarkRepository};
pub use tag_repository::TagRepository;
pub use token_repository::{ApiToken, TokenRepository};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use bookmark_repository::MockBookmarkRepository;
#[cfg(test)]
pub use tag_repository::MockTagRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
