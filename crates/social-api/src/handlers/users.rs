//! User handlers

use axum::{
    extract::{Path, State},
    Json,
};
use social_service::dto::{
    CurrentUserResponse, NumberedPage, PaginatedResponse, PostResponse, UserResponse,
    UserSearchRequest,
};
use social_service::{PostService, UserService};

use crate::extractors::{AuthUser, OptionalAuthUser, Pagination, UserIdPath, ValidatedQuery};
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /users/@me
pub async fn get_current_user(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<CurrentUserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.get_current_user(auth.viewer()).await?))
}

/// GET /users/search?q&page&limit
pub async fn search_users(
    State(state): State<AppState>,
    ValidatedQuery(request): ValidatedQuery<UserSearchRequest>,
) -> ApiResult<Json<NumberedPage<UserResponse>>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.search_users(request).await?))
}

/// GET /users/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<UserResponse>> {
    let service = UserService::new(state.service_context());
    Ok(Json(service.get_user(path.user_id()?).await?))
}

/// GET /users/{user_id}/posts?before&limit
pub async fn get_user_posts(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    Path(path): Path<UserIdPath>,
    pagination: Pagination,
) -> ApiResult<Json<PaginatedResponse<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let page = service
        .list_user_posts(
            path.user_id()?,
            auth.viewer(),
            pagination.before,
            pagination.limit,
        )
        .await?;
    Ok(Json(page))
}
