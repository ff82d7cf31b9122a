//! Handlers for tag endpoints (list, get, create).

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Serialize;
use serde_json::json;
use validator::Validate;

use crate::api::dto::pagination::{PaginationMeta, TagQueryParams};
use crate::api::dto::tag::{CreateTagRequest, TagResponse};
use crate::domain::entities::User;
use crate::error::AppError;
use crate::state::AppState;

/// Paginated tag listing.
#[derive(Debug, Serialize)]
pub struct TagListResponse {
    pub pagination: PaginationMeta,
    pub items: Vec<TagResponse>,
}

/// Lists the acting user's tags ordered by name.
///
/// # Endpoint
///
/// `GET /api/tags`
///
/// # Query Parameters
///
/// - `page` (optional): Page number (default: 1)
/// - `page_size` (optional): Items per page (default: 25, max: 1000)
///
/// # Errors
///
/// Returns 400 Bad Request if pagination parameters are invalid.
pub async fn list_tags_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Query(params): Query<TagQueryParams>,
) -> Result<Json<TagListResponse>, AppError> {
    let (offset, limit) = params
        .pagination
        .validate_and_get_offset_limit()
        .map_err(|e| AppError::bad_request(e, json!({})))?;

    let page = params.pagination.page.unwrap_or(1);
    let page_size = params.pagination.page_size.unwrap_or(25);

    let (tags, total_items) = tokio::try_join!(
        state.tag_service.list_tags(&user, offset, limit),
        state.tag_service.count_tags(&user),
    )?;

    let items = tags.iter().map(TagResponse::from).collect();

    let total_pages = ((total_items as f64) / (page_size as f64)).ceil() as u32;

    Ok(Json(TagListResponse {
        pagination: PaginationMeta {
            page,
            page_size,
            total_items,
            total_pages,
        },
        items,
    }))
}

/// Retrieves a single tag.
///
/// # Endpoint
///
/// `GET /api/tags/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the tag doesn't exist for the acting user.
pub async fn get_tag_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<TagResponse>, AppError> {
    let tag = state.tag_service.get_tag(id, &user).await?;

    Ok(Json(TagResponse::from(&tag)))
}

/// Creates a tag for the acting user, or returns the existing one.
///
/// # Endpoint
///
/// `POST /api/tags`
///
/// Creation is idempotent: submitting a name that already exists (ignoring
/// case) returns the stored tag unchanged.
///
/// # Errors
///
/// Returns 400 Bad Request if the name is missing, blank, contains
/// whitespace, or exceeds 64 characters.
pub async fn create_tag_handler(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Json(payload): Json<CreateTagRequest>,
) -> Result<(StatusCode, Json<TagResponse>), AppError> {
    payload.validate()?;

    let name = payload.name.unwrap_or_default();
    let tag = state.tag_service.get_or_create_tag(&name, &user).await?;

    Ok((StatusCode::CREATED, Json(TagResponse::from(&tag))))
}
