//! Core domain entities representing the business data model.
//!
//! This module contains the fundamental data structures that represent the
//! core concepts of the bookmark management service. Entities are plain data
//! structures without persistence logic.
//!
//! # Entity Types
//!
//! - [`Bookmark`] - A saved URL with metadata and tags
//! - [`Tag`] - A per-user label attached to bookmarks
//! - [`User`] - An account owning bookmarks and tags
//!
//! # Design Pattern
//!
//! Entities follow the "New Type" pattern with separate structs for mutation:
//! - `NewBookmark` - Draft carrying the client-settable fields of a create
//! - `BookmarkPatch` - Partial update; `None` fields are left unchanged

pub mod bookmark;
pub mod tag;
pub mod user;

pub use bookmark::{Bookmark, BookmarkPatch, NewBookmark};
pub use tag::Tag;
pub use user::User;
