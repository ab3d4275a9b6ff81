//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;

const API: &str = "/api/v1";

macro_rules! require_env {
    () => {
        if !check_test_env() {
            return;
        }
    };
}

async fn create_post(server: &TestServer, auth: &AuthResponse) -> PostResponse {
    let response = server
        .post_auth(
            &format!("{API}/posts"),
            &auth.access_token,
            &CreatePostRequest::unique(),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn add_comment(
    server: &TestServer,
    auth: &AuthResponse,
    post_id: &str,
    text: &str,
) -> CommentResponse {
    let response = server
        .post_auth(
            &format!("{API}/posts/{post_id}/comments"),
            &auth.access_token,
            &TextRequest::new(text),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn toggle(server: &TestServer, auth: &AuthResponse, path: &str, t: &str) -> ReactionSummary {
    let response = server
        .post_auth(
            &format!("{path}/reactions/toggle"),
            &auth.access_token,
            &ReactionRequest::new(t),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server
        .post(&format!("{API}/auth/register"), &request)
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(auth.user.username, request.username);
    assert!(!auth.access_token.is_empty());

    let response = server
        .post(
            &format!("{API}/auth/login"),
            &LoginRequest::from_register(&request),
        )
        .await
        .unwrap();
    let login: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(login.user.id, auth.user.id);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    server
        .post(&format!("{API}/auth/register"), &request)
        .await
        .unwrap();
    let response = server
        .post(&format!("{API}/auth/register"), &request)
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let login = LoginRequest {
        email: "nobody@example.com".to_string(),
        password: "wrongpass".to_string(),
    };

    let response = server.post(&format!("{API}/auth/login"), &login).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_and_current_user() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();

    let response = server
        .post(
            &format!("{API}/auth/refresh"),
            &RefreshRequest {
                refresh_token: auth.refresh_token.clone(),
            },
        )
        .await
        .unwrap();
    let tokens: TokenPair = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!tokens.refresh_token.is_empty());

    let response = server
        .get_auth(&format!("{API}/users/@me"), &tokens.access_token)
        .await
        .unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, auth.user.id);
    assert!(me.email.is_some());
}

#[tokio::test]
async fn test_access_token_rejected_as_refresh() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();

    let response = server
        .post(
            &format!("{API}/auth/refresh"),
            &RefreshRequest {
                refresh_token: auth.access_token,
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_create_post_requires_auth() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server
        .post(&format!("{API}/posts"), &CreatePostRequest::unique())
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_post_lifecycle() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();
    let post = create_post(&server, &auth).await;
    assert_eq!(post.author_id, auth.user.id);
    assert_eq!(post.comment_count, 0);
    assert_eq!(post.reactions.total, 0);
    assert!(!post.edited);

    let path = format!("{API}/posts/{}", post.id);
    let response = server
        .patch_auth(&path, &auth.access_token, &TextRequest::new("  edited  "))
        .await
        .unwrap();
    let edited: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.text, "edited");
    assert!(edited.edited);

    let response = server.delete_auth(&path, &auth.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&path).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(body.error.code, "UNKNOWN_POST");
}

#[tokio::test]
async fn test_edit_post_by_non_author() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let author = server.register_user().await.unwrap();
    let other = server.register_user().await.unwrap();
    let post = create_post(&server, &author).await;

    let response = server
        .patch_auth(
            &format!("{API}/posts/{}", post.id),
            &other.access_token,
            &TextRequest::new("hijacked"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

#[tokio::test]
async fn test_user_posts_paginate_newest_first() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();
    let first = create_post(&server, &auth).await;
    let second = create_post(&server, &auth).await;
    let third = create_post(&server, &auth).await;

    let base = format!("{API}/users/{}/posts", auth.user.id);
    let response = server.get(&format!("{base}?limit=2")).await.unwrap();
    let page: Page<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<_> = page.data.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec![third.id.as_str(), second.id.as_str()]);
    assert!(page.pagination.has_more);
    assert_eq!(page.pagination.limit, 2);

    let cursor = page.pagination.before.expect("cursor");
    let response = server
        .get(&format!("{base}?limit=2&before={cursor}"))
        .await
        .unwrap();
    let page: Page<PostResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].id, first.id);
    assert!(!page.pagination.has_more);
}

#[tokio::test]
async fn test_user_search_by_username() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();

    let query = auth.user.username.to_uppercase();
    let response = server
        .get(&format!("{API}/users/search?q={query}&limit=50"))
        .await
        .unwrap();
    let page: NumberedPage<UserResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.pagination.page, 1);
    assert_eq!(page.pagination.limit, 50);
    assert!(page.pagination.total >= 1);
    let found = page
        .data
        .iter()
        .find(|u| u.id == auth.user.id)
        .expect("registered user in results");
    assert!(found.email.is_none());

    let response = server.get(&format!("{API}/users/search")).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_posts_and_comments_embed_author() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.register_user().await.unwrap();
    let bob = server.register_user().await.unwrap();
    let post = create_post(&server, &alice).await;
    add_comment(&server, &bob, &post.id, "nice").await;

    let response = server.get(&format!("{API}/posts/{}", post.id)).await.unwrap();
    let fetched: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let author = fetched.author.expect("post author");
    assert_eq!(author.username, alice.user.username);
    assert!(author.email.is_none());

    let response = server
        .get(&format!("{API}/posts/{}/comments", post.id))
        .await
        .unwrap();
    let comments: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(
        comments[0].author.as_ref().map(|a| a.id.as_str()),
        Some(bob.user.id.as_str())
    );
}

#[tokio::test]
async fn test_invalid_post_id() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get(&format!("{API}/posts/not-a-number")).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Reaction Tests
// ============================================================================

#[tokio::test]
async fn test_toggle_same_type_twice_removes_reaction() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();
    let post = create_post(&server, &auth).await;
    let path = format!("{API}/posts/{}", post.id);

    let summary = toggle(&server, &auth, &path, "like").await;
    assert_eq!(summary.count("like"), 1);
    assert_eq!(summary.total, 1);
    assert_eq!(summary.me.as_deref(), Some("like"));

    let summary = toggle(&server, &auth, &path, "like").await;
    assert!(summary.counts.is_empty());
    assert_eq!(summary.total, 0);
    assert_eq!(summary.me, None);
}

#[tokio::test]
async fn test_switching_type_never_double_counts() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();
    let post = create_post(&server, &auth).await;
    let mine = format!("{API}/posts/{}/reactions/@me", post.id);

    let response = server
        .put_auth(&mine, &auth.access_token, &ReactionRequest::new("like"))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .put_auth(&mine, &auth.access_token, &ReactionRequest::new("love"))
        .await
        .unwrap();
    let summary: ReactionSummary = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.count("like"), 0);
    assert_eq!(summary.count("love"), 1);
    assert_eq!(summary.total, 1);
    assert_eq!(summary.breakdown.len(), 1);
    assert_eq!(summary.breakdown[0].reaction_type, "love");
    assert!(!summary.breakdown[0].emoji.is_empty());
}

#[tokio::test]
async fn test_clear_reaction_is_idempotent() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();
    let post = create_post(&server, &auth).await;
    let mine = format!("{API}/posts/{}/reactions/@me", post.id);

    server
        .put_auth(&mine, &auth.access_token, &ReactionRequest::new("celebrate"))
        .await
        .unwrap();

    for _ in 0..2 {
        let response = server.delete_auth(&mine, &auth.access_token).await.unwrap();
        let summary: ReactionSummary = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(summary.total, 0);
    }
}

#[tokio::test]
async fn test_reaction_rejections() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();
    let post = create_post(&server, &auth).await;
    let mine = format!("{API}/posts/{}/reactions/@me", post.id);

    let response = server
        .put_auth(&mine, &auth.access_token, &ReactionRequest::new("angry"))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "INVALID_REACTION_TYPE");

    let response = server
        .client
        .put(format!("{}{mine}", server.base_url()))
        .json(&ReactionRequest::new("like"))
        .send()
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .put_auth(
            &format!("{API}/posts/1/reactions/@me"),
            &auth.access_token,
            &ReactionRequest::new("like"),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_summary_shows_viewer_reaction_only_when_authenticated() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();
    let post = create_post(&server, &auth).await;
    let path = format!("{API}/posts/{}", post.id);
    toggle(&server, &auth, &path, "insightful").await;

    let response = server.get(&format!("{path}/reactions")).await.unwrap();
    let anonymous: ReactionSummary = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(anonymous.count("insightful"), 1);
    assert_eq!(anonymous.me, None);

    let response = server.get_auth(&path, &auth.access_token).await.unwrap();
    let post: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(post.reactions.me.as_deref(), Some("insightful"));
}

#[tokio::test]
async fn test_legacy_like_toggles_like() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();
    let post = create_post(&server, &auth).await;
    let like = format!("{API}/posts/{}/like", post.id);

    let response = server
        .post_auth(&like, &auth.access_token, &serde_json::json!({}))
        .await
        .unwrap();
    let summary: ReactionSummary = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.count("like"), 1);

    let response = server
        .post_auth(&like, &auth.access_token, &serde_json::json!({}))
        .await
        .unwrap();
    let summary: ReactionSummary = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(summary.total, 0);
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_text_rules() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();
    let post = create_post(&server, &auth).await;
    let comments = format!("{API}/posts/{}/comments", post.id);

    let response = server
        .post_auth(&comments, &auth.access_token, &TextRequest::new("  "))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "EMPTY_TEXT");

    let response = server
        .post_auth(&comments, &auth.access_token, &TextRequest::new(&"x".repeat(501)))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body.error.code, "TEXT_TOO_LONG");

    let comment = add_comment(&server, &auth, &post.id, &"x".repeat(500)).await;
    assert_eq!(comment.text.chars().count(), 500);
}

#[tokio::test]
async fn test_stranger_cannot_delete_comment() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let post_author = server.register_user().await.unwrap();
    let commenter = server.register_user().await.unwrap();
    let stranger = server.register_user().await.unwrap();
    let post = create_post(&server, &post_author).await;
    let comment = add_comment(&server, &commenter, &post.id, "hello").await;
    let path = format!("{API}/posts/{}/comments/{}", post.id, comment.id);

    let response = server.delete_auth(&path, &stranger.access_token).await.unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error.code, "NOT_AUTHORIZED");

    let response = server
        .get(&format!("{API}/posts/{}", post.id))
        .await
        .unwrap();
    let fetched: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.comment_count, 1);

    // The post author moderates their own thread
    let response = server
        .delete_auth(&path, &post_author.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();
}

#[tokio::test]
async fn test_comments_listed_oldest_first_with_reactions() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();
    let post = create_post(&server, &auth).await;
    let first = add_comment(&server, &auth, &post.id, "first").await;
    let second = add_comment(&server, &auth, &post.id, "second").await;

    let comment_path = format!("{API}/posts/{}/comments/{}", post.id, second.id);
    toggle(&server, &auth, &comment_path, "support").await;

    let response = server
        .get_auth(&format!("{API}/posts/{}/comments", post.id), &auth.access_token)
        .await
        .unwrap();
    let listed: Vec<CommentResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<_> = listed.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec![first.id.as_str(), second.id.as_str()]);
    assert_eq!(listed[0].reactions.total, 0);
    assert_eq!(listed[1].reactions.count("support"), 1);
    assert_eq!(listed[1].reactions.me.as_deref(), Some("support"));
}

#[tokio::test]
async fn test_comment_edit_by_author_only() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();
    let other = server.register_user().await.unwrap();
    let post = create_post(&server, &auth).await;
    let comment = add_comment(&server, &auth, &post.id, "draft").await;
    let path = format!("{API}/posts/{}/comments/{}", post.id, comment.id);

    let response = server
        .patch_auth(&path, &other.access_token, &TextRequest::new("mine now"))
        .await
        .unwrap();
    let body: ErrorBody = assert_json(response, StatusCode::FORBIDDEN).await.unwrap();
    assert_eq!(body.error.code, "NOT_OWNER");

    let response = server
        .patch_auth(&path, &auth.access_token, &TextRequest::new("final"))
        .await
        .unwrap();
    let edited: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.text, "final");
    assert!(edited.edited);
}

#[tokio::test]
async fn test_deleting_post_removes_thread() {
    require_env!();

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();
    let post = create_post(&server, &auth).await;
    let comment = add_comment(&server, &auth, &post.id, "soon gone").await;
    let comment_path = format!("{API}/posts/{}/comments/{}", post.id, comment.id);
    toggle(&server, &auth, &comment_path, "like").await;

    let response = server
        .delete_auth(&format!("{API}/posts/{}", post.id), &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get(&format!("{comment_path}/reactions")).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
