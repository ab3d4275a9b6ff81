//! Post handlers
//!
//! Feed, post CRUD and the legacy like toggle.

use axum::{
    extract::{Path, State},
    Json,
};
use social_service::dto::{
    CreatePostRequest, PaginatedResponse, PostResponse, ReactionSummaryResponse, UpdatePostRequest,
};
use social_service::PostService;

use crate::extractors::{AuthUser, OptionalAuthUser, Pagination, PostIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Newest posts first
///
/// GET /posts?before&limit
pub async fn list_feed(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let page = service
        .list_feed(auth.viewer(), pagination.before, None, pagination.limit)
        .await?;
    Ok(Json(page))
}

/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let post = service.create_post(auth.viewer(), request).await?;
    Ok(Created(Json(post)))
}

/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.get_post(path.post_id()?, auth.viewer()).await?))
}

/// PATCH /posts/{post_id}
pub async fn edit_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    let post = service
        .edit_post(path.post_id()?, auth.viewer(), request)
        .await?;
    Ok(Json(post))
}

/// DELETE /posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<NoContent> {
    let service = PostService::new(state.service_context());
    service.delete_post(path.post_id()?, auth.viewer()).await?;
    Ok(NoContent)
}

/// Toggle the `like` reaction
///
/// POST /posts/{post_id}/like
pub async fn like_post(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<ReactionSummaryResponse>> {
    let service = PostService::new(state.service_context());
    let summary = service.toggle_like(path.post_id()?, auth.viewer()).await?;
    Ok(Json(summary.into()))
}
