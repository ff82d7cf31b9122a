//! API route configuration.
//!
//! All API endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`].

use crate::api::handlers::{
    archive_bookmark_handler, create_bookmark_handler, create_tag_handler,
    delete_bookmark_handler, get_bookmark_handler, get_tag_handler,
    list_archived_bookmarks_handler, list_bookmarks_handler, list_tags_handler,
    unarchive_bookmark_handler, update_bookmark_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes, protected by Bearer token authentication.
///
/// # Endpoints
///
/// - `GET    /bookmarks`                - List non-archived bookmarks (paginated)
/// - `POST   /bookmarks`                - Create a bookmark
/// - `GET    /bookmarks/archived`       - List archived bookmarks (paginated)
/// - `GET    /bookmarks/{id}`           - Retrieve a bookmark
/// - `PATCH  /bookmarks/{id}`           - Partially update a bookmark
/// - `DELETE /bookmarks/{id}`           - Delete a bookmark
/// - `POST   /bookmarks/{id}/archive`   - Move a bookmark to the archive
/// - `POST   /bookmarks/{id}/unarchive` - Restore a bookmark from the archive
/// - `GET    /tags`                     - List tags (paginated)
/// - `POST   /tags`                     - Create a tag (idempotent)
/// - `GET    /tags/{id}`                - Retrieve a tag
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/bookmarks",
            get(list_bookmarks_handler).post(create_bookmark_handler),
        )
        .route("/bookmarks/archived", get(list_archived_bookmarks_handler))
        .route(
            "/bookmarks/{id}",
            get(get_bookmark_handler)
                .patch(update_bookmark_handler)
                .delete(delete_bookmark_handler),
        )
        .route("/bookmarks/{id}/archive", post(archive_bookmark_handler))
        .route("/bookmarks/{id}/unarchive", post(unarchive_bookmark_handler))
        .route("/tags", get(list_tags_handler).post(create_tag_handler))
        .route("/tags/{id}", get(get_tag_handler))
}
