//! Reaction handlers
//!
//! Posts and comments expose the same four operations: read the summary,
//! set or clear the caller's reaction, and toggle a type server-side. Every
//! write answers with the subject's updated summary.

use axum::{
    extract::{Path, State},
    Json,
};
use social_core::Subject;
use social_service::dto::{ReactionSummaryResponse, SetReactionRequest};
use social_service::ReactionService;

use crate::extractors::{AuthUser, CommentIdPath, OptionalAuthUser, PostIdPath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

async fn comment_subject(state: &AppState, path: &CommentIdPath) -> ApiResult<Subject> {
    let service = ReactionService::new(state.service_context());
    Ok(service
        .comment_subject(path.post_id()?, path.comment_id()?)
        .await?)
}

// ============================================================================
// Post reactions
// ============================================================================

/// GET /posts/{post_id}/reactions
pub async fn get_post_reactions(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<ReactionSummaryResponse>> {
    let service = ReactionService::new(state.service_context());
    let summary = service
        .summary(Subject::post(path.post_id()?), auth.viewer())
        .await?;
    Ok(Json(summary.into()))
}

/// PUT /posts/{post_id}/reactions/@me
pub async fn set_post_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
    ValidatedJson(request): ValidatedJson<SetReactionRequest>,
) -> ApiResult<Json<ReactionSummaryResponse>> {
    let service = ReactionService::new(state.service_context());
    let summary = service
        .set_reaction(
            Subject::post(path.post_id()?),
            auth.viewer(),
            &request.reaction_type,
        )
        .await?;
    Ok(Json(summary.into()))
}

/// DELETE /posts/{post_id}/reactions/@me
pub async fn clear_post_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
) -> ApiResult<Json<ReactionSummaryResponse>> {
    let service = ReactionService::new(state.service_context());
    let summary = service
        .clear_reaction(Subject::post(path.post_id()?), auth.viewer())
        .await?;
    Ok(Json(summary.into()))
}

/// POST /posts/{post_id}/reactions/toggle
pub async fn toggle_post_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<PostIdPath>,
    ValidatedJson(request): ValidatedJson<SetReactionRequest>,
) -> ApiResult<Json<ReactionSummaryResponse>> {
    let service = ReactionService::new(state.service_context());
    let summary = service
        .toggle_reaction(
            Subject::post(path.post_id()?),
            auth.viewer(),
            &request.reaction_type,
        )
        .await?;
    Ok(Json(summary.into()))
}

// ============================================================================
// Comment reactions
// ============================================================================

/// GET /posts/{post_id}/comments/{comment_id}/reactions
pub async fn get_comment_reactions(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<CommentIdPath>,
) -> ApiResult<Json<ReactionSummaryResponse>> {
    let subject = comment_subject(&state, &path).await?;
    let service = ReactionService::new(state.service_context());
    let summary = service.summary(subject, auth.viewer()).await?;
    Ok(Json(summary.into()))
}

/// PUT /posts/{post_id}/comments/{comment_id}/reactions/@me
pub async fn set_comment_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommentIdPath>,
    ValidatedJson(request): ValidatedJson<SetReactionRequest>,
) -> ApiResult<Json<ReactionSummaryResponse>> {
    let subject = comment_subject(&state, &path).await?;
    let service = ReactionService::new(state.service_context());
    let summary = service
        .set_reaction(subject, auth.viewer(), &request.reaction_type)
        .await?;
    Ok(Json(summary.into()))
}

/// DELETE /posts/{post_id}/comments/{comment_id}/reactions/@me
pub async fn clear_comment_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommentIdPath>,
) -> ApiResult<Json<ReactionSummaryResponse>> {
    let subject = comment_subject(&state, &path).await?;
    let service = ReactionService::new(state.service_context());
    let summary = service.clear_reaction(subject, auth.viewer()).await?;
    Ok(Json(summary.into()))
}

/// POST /posts/{post_id}/comments/{comment_id}/reactions/toggle
pub async fn toggle_comment_reaction(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<CommentIdPath>,
    ValidatedJson(request): ValidatedJson<SetReactionRequest>,
) -> ApiResult<Json<ReactionSummaryResponse>> {
    let subject = comment_subject(&state, &path).await?;
    let service = ReactionService::new(state.service_context());
    let summary = service
        .toggle_reaction(subject, auth.viewer(), &request.reaction_type)
        .await?;
    Ok(Json(summary.into()))
}
