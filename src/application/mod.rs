//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository
//! calls, validation, and business rules. Services consume repository traits
//! and provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::bookmark_service::BookmarkService`] - Bookmark creation, update, and listing
//! - [`services::tag_service::TagService`] - Tag lookup and idempotent creation
//! - [`services::auth_service::AuthService`] - API token authentication

pub mod services;
