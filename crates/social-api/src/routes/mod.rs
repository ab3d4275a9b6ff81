//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::handlers::{auth, comments, health, posts, reactions, users};
use crate::state::AppState;

/// Create the main API router (health routes are separate so they bypass rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(post_routes())
        .merge(comment_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/@me", get(users::get_current_user))
        .route("/users/search", get(users::search_users))
        .route("/users/:user_id", get(users::get_user))
        .route("/users/:user_id/posts", get(users::get_user_posts))
}

/// Posts and their reactions
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::list_feed).post(posts::create_post))
        .route(
            "/posts/:post_id",
            get(posts::get_post)
                .patch(posts::edit_post)
                .delete(posts::delete_post),
        )
        .route("/posts/:post_id/like", post(posts::like_post))
        .route("/posts/:post_id/reactions", get(reactions::get_post_reactions))
        .route(
            "/posts/:post_id/reactions/@me",
            put(reactions::set_post_reaction).delete(reactions::clear_post_reaction),
        )
        .route(
            "/posts/:post_id/reactions/toggle",
            post(reactions::toggle_post_reaction),
        )
}

/// Comment threads and comment reactions
fn comment_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/posts/:post_id/comments",
            get(comments::list_comments).post(comments::add_comment),
        )
        .route(
            "/posts/:post_id/comments/:comment_id",
            patch(comments::edit_comment).delete(comments::delete_comment),
        )
        .route(
            "/posts/:post_id/comments/:comment_id/reactions",
            get(reactions::get_comment_reactions),
        )
        .route(
            "/posts/:post_id/comments/:comment_id/reactions/@me",
            put(reactions::set_comment_reaction).delete(reactions::clear_comment_reaction),
        )
        .route(
            "/posts/:post_id/comments/:comment_id/reactions/toggle",
            post(reactions::toggle_comment_reaction),
        )
}
