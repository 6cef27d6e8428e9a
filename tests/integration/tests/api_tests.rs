//! End-to-end API tests
//!
//! These tests need PostgreSQL and Redis. Set DATABASE_URL and REDIS_URL
//! (a `.env` file works) or every test is skipped.

use integration_tests::*;
use reqwest::StatusCode;
use serde_json::json;
use social_service::AnalyticsService;

macro_rules! require_env {
    () => {
        if !check_test_env().await {
            return;
        }
    };
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints() {
    require_env!();
    let server = TestServer::start().await.expect("server");

    let response = server.get("/health").await.expect("request");
    assert_status(response, StatusCode::OK).await.expect("liveness");

    let response = server.get("/health/ready").await.expect("request");
    let body: serde_json::Value = assert_json(response, StatusCode::OK).await.expect("readiness");
    assert_eq!(body["status"], "ready");
}

// ============================================================================
// Auth
// ============================================================================

#[tokio::test]
async fn test_signup_and_duplicate() {
    require_env!();
    let server = TestServer::start().await.expect("server");
    let signup = SignupRequest::unique();

    let response = server.post("/auth/signup", &signup).await.expect("request");
    let user: UserBody = assert_json(response, StatusCode::CREATED).await.expect("signup");
    assert_eq!(user.username, signup.username);
    assert_eq!(user.email, signup.email);

    let response = server.post("/auth/signup", &signup).await.expect("request");
    let code = assert_error(response, StatusCode::CONFLICT).await.expect("duplicate");
    assert_eq!(code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_signup_validation() {
    require_env!();
    let server = TestServer::start().await.expect("server");

    let mut signup = SignupRequest::unique();
    signup.password = "123".to_string();

    let response = server.post("/auth/signup", &signup).await.expect("request");
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.expect("validation");
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_with_form() {
    require_env!();
    let server = TestServer::start().await.expect("server");
    let user = TestUser::create(&server).await.expect("user");

    let response = server
        .post_form("/auth/login", &LoginForm::from_signup(&user.signup))
        .await
        .expect("request");
    let tokens: TokenBody = assert_json(response, StatusCode::OK).await.expect("login");
    assert_eq!(tokens.token_type, "bearer");
    assert!(tokens.expires_in > 0);
    assert!(!tokens.refresh_token.is_empty());

    let wrong = LoginForm {
        username: user.signup.email.clone(),
        password: "wrongpw".to_string(),
    };
    let response = server.post_form("/auth/login", &wrong).await.expect("request");
    assert_status(response, StatusCode::UNAUTHORIZED).await.expect("bad password");
}

#[tokio::test]
async fn test_refresh_and_logout() {
    require_env!();
    let server = TestServer::start().await.expect("server");
    let user = TestUser::create(&server).await.expect("user");

    // access tokens are not accepted for refresh
    let response = server
        .get_auth("/auth/refresh_token", &user.access_token)
        .await
        .expect("request");
    assert_status(response, StatusCode::UNAUTHORIZED).await.expect("access as refresh");

    let response = server
        .get_auth("/auth/refresh_token", &user.refresh_token)
        .await
        .expect("request");
    let tokens: TokenBody = assert_json(response, StatusCode::OK).await.expect("refresh");

    let response = server
        .post_empty_auth("/auth/logout", &tokens.access_token)
        .await
        .expect("request");
    assert_status(response, StatusCode::NO_CONTENT).await.expect("logout");

    // the stored refresh token is gone after logout
    let response = server
        .get_auth("/auth/refresh_token", &tokens.refresh_token)
        .await
        .expect("request");
    assert_status(response, StatusCode::UNAUTHORIZED).await.expect("revoked");
}

#[tokio::test]
async fn test_email_confirmation() {
    require_env!();
    let server = TestServer::start().await.expect("server");
    let user = TestUser::create(&server).await.expect("user");

    let response = server
        .post("/auth/request_email", &json!({ "email": user.signup.email }))
        .await
        .expect("request");
    assert_status(response, StatusCode::OK).await.expect("request email");

    let token = server
        .state
        .jwt_service()
        .generate_email_confirmation_token(&user.signup.email)
        .expect("token");
    let response = server
        .get(&format!("/auth/confirmed_email/{token}"))
        .await
        .expect("request");
    assert_status(response, StatusCode::OK).await.expect("confirm");

    let response = server.get_auth("/api/users/me", &user.access_token).await.expect("request");
    let me: CurrentUserBody = assert_json(response, StatusCode::OK).await.expect("me");
    assert!(me.confirmed);

    let response = server
        .get("/auth/confirmed_email/not-a-token")
        .await
        .expect("request");
    assert_status(response, StatusCode::BAD_REQUEST).await.expect("bad token");
}

// ============================================================================
// Users
// ============================================================================

#[tokio::test]
async fn test_me_requires_token() {
    require_env!();
    let server = TestServer::start().await.expect("server");

    let response = server.get("/api/users/me").await.expect("request");
    assert_status(response, StatusCode::UNAUTHORIZED).await.expect("anonymous");

    let user = TestUser::create(&server).await.expect("user");
    let response = server.get_auth("/api/users/me", &user.access_token).await.expect("request");
    let me: CurrentUserBody = assert_json(response, StatusCode::OK).await.expect("me");
    assert_eq!(me.id, user.id);
    assert_eq!(me.username, user.signup.username);
    assert_eq!(me.email, user.signup.email);
}

#[tokio::test]
async fn test_password_reset_flow() {
    require_env!();
    let server = TestServer::start().await.expect("server");
    let user = TestUser::create(&server).await.expect("user");

    let known = server
        .post("/api/users/reset_password_email", &json!({ "email": user.signup.email }))
        .await
        .expect("request");
    let known: MessageBody = assert_json(known, StatusCode::OK).await.expect("known");

    let unknown = server
        .post(
            "/api/users/reset_password_email",
            &json!({ "email": format!("missing{}@example.com", unique_suffix()) }),
        )
        .await
        .expect("request");
    let unknown: MessageBody = assert_json(unknown, StatusCode::OK).await.expect("unknown");
    assert_eq!(known.message, unknown.message);

    let token = server
        .state
        .jwt_service()
        .generate_password_reset_token(&user.signup.email)
        .expect("token");

    let mismatch = json!({ "new_password": "newpass1", "r_new_password": "newpass2" });
    let response = server
        .post(&format!("/api/users/reset_password/{token}"), &mismatch)
        .await
        .expect("request");
    assert_status(response, StatusCode::BAD_REQUEST).await.expect("mismatch");

    let body = json!({ "new_password": "newpass1", "r_new_password": "newpass1" });
    let response = server
        .post(&format!("/api/users/reset_password/{token}"), &body)
        .await
        .expect("request");
    assert_status(response, StatusCode::OK).await.expect("reset");

    let old = server
        .post_form("/auth/login", &LoginForm::from_signup(&user.signup))
        .await
        .expect("request");
    assert_status(old, StatusCode::UNAUTHORIZED).await.expect("old password");

    let new = LoginForm {
        username: user.signup.email.clone(),
        password: "newpass1".to_string(),
    };
    let response = server.post_form("/auth/login", &new).await.expect("request");
    assert_status(response, StatusCode::OK).await.expect("new password");
}

#[tokio::test]
async fn test_user_activity_and_posts() {
    require_env!();
    let server = TestServer::start().await.expect("server");
    let user = TestUser::create(&server).await.expect("user");

    user.create_post(&server, "first").await.expect("post");
    user.create_post(&server, "second").await.expect("post");

    let response = server
        .get(&format!("/api/users/user/{}/activity", user.id))
        .await
        .expect("request");
    let activity: ActivityBody = assert_json(response, StatusCode::OK).await.expect("activity");
    assert_eq!(activity.user_id, user.id);
    assert!(activity.last_login_at.is_some());
    assert!(activity.last_request_at.is_some());

    let response = server
        .get(&format!("/api/users/user/{}/posts?limit=1", user.id))
        .await
        .expect("request");
    let page: PostListBody = assert_json(response, StatusCode::OK).await.expect("posts");
    assert_eq!(page.posts.len(), 1);
    assert_eq!(page.posts[0].post, "second");

    let response = server.get("/api/users/user/0/activity").await.expect("request");
    assert_status(response, StatusCode::NOT_FOUND).await.expect("unknown user");
}

// ============================================================================
// Posts & Reactions
// ============================================================================

#[tokio::test]
async fn test_post_lifecycle() {
    require_env!();
    let server = TestServer::start().await.expect("server");
    let author = TestUser::create(&server).await.expect("author");
    let other = TestUser::create(&server).await.expect("other");

    let post = author.create_post(&server, "hello world").await.expect("post");
    assert_eq!(post.user_id, author.id);
    assert_eq!((post.likes, post.dislikes), (0, 0));

    let response = server.get(&format!("/api/posts/{}", post.id)).await.expect("request");
    let fetched: PostBody = assert_json(response, StatusCode::OK).await.expect("get");
    assert_eq!(fetched.post, "hello world");

    let response = server.get("/api/posts?limit=5").await.expect("request");
    let feed: PostListBody = assert_json(response, StatusCode::OK).await.expect("feed");
    assert!(feed.posts.len() <= 5);

    let response = server
        .delete_auth(&format!("/api/posts/{}", post.id), &other.access_token)
        .await
        .expect("request");
    assert_status(response, StatusCode::FORBIDDEN).await.expect("non-owner");

    let response = server
        .delete_auth(&format!("/api/posts/{}", post.id), &author.access_token)
        .await
        .expect("request");
    assert_status(response, StatusCode::NO_CONTENT).await.expect("delete");

    let response = server.get(&format!("/api/posts/{}", post.id)).await.expect("request");
    let code = assert_error(response, StatusCode::NOT_FOUND).await.expect("gone");
    assert_eq!(code, "UNKNOWN_POST");
}

#[tokio::test]
async fn test_reactions() {
    require_env!();
    let server = TestServer::start().await.expect("server");
    let author = TestUser::create(&server).await.expect("author");
    let fan = TestUser::create(&server).await.expect("fan");
    let post = author.create_post(&server, "react to me").await.expect("post");

    let like = format!("/api/posts/{}/like", post.id);
    let unlike = format!("/api/posts/{}/unlike", post.id);
    let reaction = format!("/api/posts/{}/reaction", post.id);

    let response = server.post_empty_auth(&like, &fan.access_token).await.expect("request");
    let body: ReactionBody = assert_json(response, StatusCode::OK).await.expect("like");
    assert_eq!(body.post_id, post.id);
    assert_eq!((body.likes, body.dislikes), (1, 0));
    assert_eq!(body.reaction.as_deref(), Some("like"));

    let response = server.post_empty_auth(&like, &fan.access_token).await.expect("request");
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.expect("again");
    assert_eq!(code, "ALREADY_REACTED");

    let response = server.post_empty_auth(&unlike, &fan.access_token).await.expect("request");
    let body: ReactionBody = assert_json(response, StatusCode::OK).await.expect("switch");
    assert_eq!((body.likes, body.dislikes), (0, 1));

    let response = server.delete_auth(&reaction, &fan.access_token).await.expect("request");
    let body: ReactionBody = assert_json(response, StatusCode::OK).await.expect("remove");
    assert_eq!((body.likes, body.dislikes), (0, 0));
    assert!(body.reaction.is_none());

    let response = server.delete_auth(&reaction, &fan.access_token).await.expect("request");
    assert_status(response, StatusCode::NOT_FOUND).await.expect("nothing to remove");

    let response = server
        .post_empty_auth("/api/posts/0/like", &fan.access_token)
        .await
        .expect("request");
    assert_status(response, StatusCode::NOT_FOUND).await.expect("missing post");
}

// ============================================================================
// Comments
// ============================================================================

#[tokio::test]
async fn test_comment_lifecycle() {
    require_env!();
    let server = TestServer::start().await.expect("server");
    let author = TestUser::create(&server).await.expect("author");
    let other = TestUser::create(&server).await.expect("other");
    let post = author.create_post(&server, "discuss").await.expect("post");
    let list_path = format!("/api/comments/posts/{}/comments", post.id);

    let response = server.get(&list_path).await.expect("request");
    let empty: CommentListBody = assert_json(response, StatusCode::OK).await.expect("empty");
    assert!(empty.comments.is_empty());

    let response = server
        .post_auth(
            "/api/comments",
            &other.access_token,
            &json!({ "post_id": post.id, "comment": "nice" }),
        )
        .await
        .expect("request");
    let comment: CommentBody = assert_json(response, StatusCode::CREATED).await.expect("create");
    assert_eq!(comment.post_id, post.id);
    assert_eq!(comment.user_id, other.id);

    let update = json!({ "comment_id": comment.id, "post_id": post.id, "comment": "edited" });
    let response = server
        .put_auth("/api/comments/update", &author.access_token, &update)
        .await
        .expect("request");
    assert_status(response, StatusCode::NOT_FOUND).await.expect("not the author");

    let response = server
        .put_auth("/api/comments/update", &other.access_token, &update)
        .await
        .expect("request");
    let updated: CommentUpdatedBody = assert_json(response, StatusCode::OK).await.expect("update");
    assert_eq!(updated.comment_id, comment.id);
    assert_eq!(updated.comment, "edited");

    let response = server.get(&list_path).await.expect("request");
    let list: CommentListBody = assert_json(response, StatusCode::OK).await.expect("list");
    assert_eq!(list.comments.len(), 1);
    assert_eq!(list.comments[0].comment, "edited");

    let response = server
        .delete_auth(&format!("/api/comments/{}", comment.id), &other.access_token)
        .await
        .expect("request");
    assert_status(response, StatusCode::NO_CONTENT).await.expect("delete");

    let response = server
        .get("/api/comments/posts/0/comments")
        .await
        .expect("request");
    assert_status(response, StatusCode::NOT_FOUND).await.expect("missing post");
}

// ============================================================================
// Analytics
// ============================================================================

#[tokio::test]
async fn test_post_analytics() {
    require_env!();
    let server = TestServer::start().await.expect("server");
    let author = TestUser::create(&server).await.expect("author");
    let fan = TestUser::create(&server).await.expect("fan");
    let critic = TestUser::create(&server).await.expect("critic");
    let post = author.create_post(&server, "measure me").await.expect("post");

    for (user, action) in [(&fan, "like"), (&critic, "unlike"), (&author, "like")] {
        let response = server
            .post_empty_auth(&format!("/api/posts/{}/{action}", post.id), &user.access_token)
            .await
            .expect("request");
        assert_status(response, StatusCode::OK).await.expect("react");
    }

    AnalyticsService::new(server.state.service_context())
        .aggregate_now()
        .await
        .expect("aggregate");

    let today = chrono::Utc::now().date_naive();
    let path = format!(
        "/api/analytics/post/{}/likes-dislikes?start_date={}&end_date={}",
        post.id,
        today - chrono::Duration::days(1),
        today + chrono::Duration::days(1)
    );

    let response = server.get_auth(&path, &author.access_token).await.expect("request");
    let body: AnalyticsBody = assert_json(response, StatusCode::OK).await.expect("analytics");
    assert_eq!(body.analytics_data.len(), 1);
    assert_eq!(body.analytics_data[0].date, today.to_string());
    assert_eq!(body.analytics_data[0].likes, 2);
    assert_eq!(body.analytics_data[0].dislikes, 1);

    let response = server.get_auth(&path, &fan.access_token).await.expect("request");
    let code = assert_error(response, StatusCode::FORBIDDEN).await.expect("non-owner");
    assert_eq!(code, "NOT_POST_OWNER");

    let reversed = format!(
        "/api/analytics/post/{}/likes-dislikes?start_date={}&end_date={}",
        post.id,
        today,
        today - chrono::Duration::days(3)
    );
    let response = server.get_auth(&reversed, &author.access_token).await.expect("request");
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.expect("range");
    assert_eq!(code, "INVALID_DATE_RANGE");
}

// ============================================================================
// Rate limiting
// ============================================================================

#[tokio::test]
async fn test_rate_limit_by_client_address() {
    require_env!();
    let mut config = test_config().expect("config");
    config.rate_limit.enabled = true;
    config.rate_limit.max_requests = 3;
    config.rate_limit.window_seconds = 60;
    let server = TestServer::start_with_config(config).await.expect("server");

    // a fresh address per run keeps earlier runs from sharing the window
    let client_address = format!("10.{}.{}.{}", rand_octet(), rand_octet(), rand_octet());
    let mut statuses = Vec::new();
    let mut last = None;
    for _ in 0..4 {
        let response = server
            .client
            .get(format!("{}/", server.base_url()))
            .header("x-forwarded-for", &client_address)
            .send()
            .await
            .expect("request");
        statuses.push(response.status());
        last = Some(response);
    }

    assert_eq!(
        statuses,
        vec![StatusCode::OK, StatusCode::OK, StatusCode::OK, StatusCode::TOO_MANY_REQUESTS]
    );

    let last = last.expect("response");
    assert_eq!(last.headers()["x-ratelimit-limit"], "3");
    assert_eq!(last.headers()["x-ratelimit-remaining"], "0");
    assert!(last.headers().contains_key("x-ratelimit-reset"));

    // health checks sit outside the limiter
    let response = server
        .client
        .get(format!("{}/health", server.base_url()))
        .header("x-forwarded-for", &client_address)
        .send()
        .await
        .expect("request");
    assert_eq!(response.status(), StatusCode::OK);
}

fn rand_octet() -> u8 {
    uuid::Uuid::new_v4().as_bytes()[0]
}
