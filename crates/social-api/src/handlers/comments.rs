//! Comment handlers

use axum::{
    extract::{Path, State},
    Json,
};
use social_service::dto::{CommentResponse, CreateCommentRequest, UpdateCommentRequest};
use social_service::CommentService;

use crate::extractors::{AuthUser, CommentIdPath, OptionalAuthUser, PostIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Comments oldest first, each with its reaction summary
///
/// GET /posts/{post_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let comments = service.list_comments(path.post_id()?, auth.viewer()).await?;
    Ok(Json(comments))
}

/// POST /posts/{post_id}/comments
pub async fn add_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let comment = service
        .add_comment(path.post_id()?, auth.viewer(), request)
        .await?;
    Ok(Created(Json(comment)))
}

/// PATCH /posts/{post_id}/comments/{comment_id}
pub async fn edit_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommentIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    let comment = service
        .edit_comment(path.post_id()?, path.comment_id()?, auth.viewer(), request)
        .await?;
    Ok(Json(comment))
}

/// DELETE /posts/{post_id}/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommentIdPath>,
) -> ApiResult<NoContent> {
    let service = CommentService::new(state.service_context());
    service
        .delete_comment(path.post_id()?, path.comment_id()?, auth.viewer())
        .await?;
    Ok(NoContent)
}
