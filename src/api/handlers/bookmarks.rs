//! Handlers for bookmark endpoints (list, create, update, archive, delete).

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::json;
use validator::Validate;

use crate::api::dto::bookmark::{BookmarkResponse, CreateBookmarkRequest, UpdateBookmarkRequest};
use crate::api::dto::pagination::{BookmarkQueryParams, PaginationMeta};
use crate::domain::entities::{BookmarkPatch, Tag, User};
use crate::domain::repositories::BookmarkFilter;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::tag_string::build_tag_string;

/// Paginated bookmark listing.
#[derive(Debug, Serialize)]
pub struct BookmarkListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<BookmarkResponse>,
}

/// Lists the acting user's non-archived bookmarks.
///
/// # Endpoint
///
/// `GET /api/bookmarks`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default: 25, max: 1000)
/// - `q` (optional): Case-insensitive search over url, title, and description
///
/// # Performance
///
/// Tags for the whole page are prefetched with a single batched query before
/// per-item serialization; the page and total count run via `tokio::try_join!`.
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn list_bookmarks_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(params): Query<BookmarkQueryParams>,
) -> Result<Json<BookmarkListResponse>, AppError> {
    list_page(&state, &user, params, false).await
}

/// Lists the acting user's archived bookmarks.
///
/// # Endpoint
///
/// `GET /api/bookmarks/archived`
///
/// Same parameters and response shape as `GET /api/bookmarks`.
pub async fn list_archived_bookmarks_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(params): Query<BookmarkQueryParams>,
) -> Result<Json<BookmarkListResponse>, AppError> {
    list_page(&state, &user, params, true).await
}

/// Shared listing flow for the archived and non-archived variants.
async fn list_page(
    state: &AppState,
    user: &User,
    params: BookmarkQueryParams,
    archived: bool,
) -> Result<Json<BookmarkListResponse>, AppError> {
    let (offset, limit) = params
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let page = params.pagination.page.unwrap_or(1);
    let page_size = params.pagination.page_size.unwrap_or(25);

    let filter = BookmarkFilter::new(offset, limit)
        .archived(archived)
        .with_query(params.q);

    let ((bookmarks, mut tags_by_bookmark), total_items) = tokio::try_join!(
        state.bookmark_service.list_bookmarks(user, filter.clone()),
        state.bookmark_service.count_bookmarks(user, &filter),
    )?;

    let items = bookmarks
        .iter()
        .map(|bookmark| {
            let tags = tags_by_bookmark.remove(&bookmark.id).unwrap_or_default();
            BookmarkResponse::from_entity(bookmark, tag_names(&tags), Some(user))
        })
        .collect();

    let total_pages = ((total_items as f64) / (page_size as f64)).ceil() as u32;

    Ok(Json(BookmarkListResponse {
        pagination: PaginationMeta {
            page,
            page_size,
            total_items,
            total_pages,
        },
        items,
    }))
}

/// Retrieves a single bookmark.
///
/// # Endpoint
///
/// `GET /api/bookmarks/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the bookmark doesn't exist for the acting user.
pub async fn get_bookmark_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<BookmarkResponse>, AppError> {
    let bookmark = state.bookmark_service.get_bookmark(id, &user).await?;
    let tags = state.bookmark_service.bookmark_tags(id).await?;

    Ok(Json(BookmarkResponse::from_entity(
        &bookmark,
        tag_names(&tags),
        Some(&user),
    )))
}

/// Creates a bookmark for the acting user.
///
/// # Endpoint
///
/// `POST /api/bookmarks`
///
/// # Request Body
///
/// `url` is required; title/description default to `""`, flags to `false`,
/// and `tag_names` to `[]`. Read-only fields in the payload are ignored.
///
/// ```json
/// {
///   "url": "https://example.com",
///   "title": "Example",          // optional
///   "tag_names": ["rust", "web"] // optional
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request with per-field details if validation fails; the
/// create is not attempted in that case.
pub async fn create_bookmark_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateBookmarkRequest>,
) -> Result<(StatusCode, Json<BookmarkResponse>), AppError> {
    payload.validate()?;

    let (draft, names) = payload.into_parts();
    let tag_string = build_tag_string(&names);

    let bookmark = state
        .bookmark_service
        .create_bookmark(draft, &tag_string, &user)
        .await?;
    let tags = state.bookmark_service.bookmark_tags(bookmark.id).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookmarkResponse::from_entity(
            &bookmark,
            tag_names(&tags),
            Some(&user),
        )),
    ))
}

/// Partially updates a bookmark.
///
/// # Endpoint
///
/// `PATCH /api/bookmarks/{id}`
///
/// # Request Body
///
/// All fields are optional. Only provided url/title/description/unread/shared
/// values are applied; absent fields are left unchanged. When `tag_names` is
/// absent the current tag set is re-asserted. `is_archived` is accepted but
/// ignored here; use the archive endpoints.
///
/// ```json
/// {
///   "title": "New title",
///   "tag_names": ["rust"]
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the bookmark doesn't exist for the acting user.
/// Returns 400 Bad Request if validation fails.
pub async fn update_bookmark_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<UpdateBookmarkRequest>,
) -> Result<Json<BookmarkResponse>, AppError> {
    payload.validate()?;

    let mut bookmark = state.bookmark_service.get_bookmark(id, &user).await?;
    let current_tags = state.bookmark_service.bookmark_tags(id).await?;

    if payload.is_archived.is_some() {
        tracing::debug!(
            bookmark_id = id,
            "is_archived is ignored on update; use the archive endpoints"
        );
    }

    let tag_string = resolve_tag_string(payload.tag_names, &current_tags);

    bookmark.apply(BookmarkPatch {
        url: payload.url,
        title: payload.title,
        description: payload.description,
        unread: payload.unread,
        shared: payload.shared,
    });

    let updated = state
        .bookmark_service
        .update_bookmark(bookmark, &tag_string, &user)
        .await?;
    let tags = state.bookmark_service.bookmark_tags(updated.id).await?;

    Ok(Json(BookmarkResponse::from_entity(
        &updated,
        tag_names(&tags),
        Some(&user),
    )))
}

/// Deletes a bookmark.
///
/// # Endpoint
///
/// `DELETE /api/bookmarks/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the bookmark doesn't exist for the acting user.
pub async fn delete_bookmark_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<StatusCode, AppError> {
    state.bookmark_service.delete_bookmark(id, &user).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Moves a bookmark to the archive.
///
/// # Endpoint
///
/// `POST /api/bookmarks/{id}/archive`
///
/// # Errors
///
/// Returns 404 Not Found if the bookmark doesn't exist for the acting user.
pub async fn archive_bookmark_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<StatusCode, AppError> {
    state.bookmark_service.archive_bookmark(id, &user).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Restores a bookmark from the archive.
///
/// # Endpoint
///
/// `POST /api/bookmarks/{id}/unarchive`
///
/// # Errors
///
/// Returns 404 Not Found if the bookmark doesn't exist for the acting user.
pub async fn unarchive_bookmark_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<StatusCode, AppError> {
    state.bookmark_service.unarchive_bookmark(id, &user).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn tag_names(tags: &[Tag]) -> Vec<String> {
    tags.iter().map(|t| t.name.clone()).collect()
}

/// Chooses the tag string for an update: the payload's tag list when given,
/// otherwise the bookmark's current tags re-asserted unchanged.
fn resolve_tag_string(payload_tag_names: Option<Vec<String>>, current_tags: &[Tag]) -> String {
    match payload_tag_names {
        Some(names) => build_tag_string(&names),
        None => build_tag_string(&tag_names(current_tags)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn tags(names: &[&str]) -> Vec<Tag> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Tag::new(i as i64 + 1, name.to_string(), 1, Utc::now()))
            .collect()
    }

    #[test]
    fn test_resolve_tag_string_uses_payload_when_present() {
        let current = tags(&["old"]);

        let result = resolve_tag_string(Some(vec!["new".to_string()]), &current);

        assert_eq!(result, "new");
    }

    #[test]
    fn test_resolve_tag_string_empty_payload_clears_tags() {
        let current = tags(&["old"]);

        let result = resolve_tag_string(Some(Vec::new()), &current);

        assert_eq!(result, "");
    }

    #[test]
    fn test_resolve_tag_string_absent_payload_reasserts_current_tags() {
        let current = tags(&["keep", "these"]);

        let result = resolve_tag_string(None, &current);

        assert_eq!(result, "keep,these");
    }

    #[test]
    fn test_resolve_tag_string_absent_payload_no_current_tags() {
        let result = resolve_tag_string(None, &[]);

        assert_eq!(result, "");
    }
}
