//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod bookmarks;
pub mod health;
pub mod tags;

pub use bookmarks::{
    archive_bookmark_handler, create_bookmark_handler, delete_bookmark_handler,
    get_bookmark_handler, list_archived_bookmarks_handler, list_bookmarks_handler,
    unarchive_bookmark_handler, update_bookmark_handler,
};
pub use health::health_handler;
pub use tags::{create_tag_handler, get_tag_handler, list_tags_handler};
