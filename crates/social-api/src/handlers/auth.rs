//! Authentication handlers
//!
//! Signup, login, token refresh, logout and email confirmation.

use axum::{
    extract::{Path, State},
    Json,
};
use social_service::dto::{
    EmailRequest, LoginForm, MessageResponse, SignupRequest, TokenResponse, UserResponse,
};
use social_service::AuthService;

use crate::extractors::{AuthUser, BearerToken, ValidatedForm, ValidatedJson};
use crate::response::{ApiResult, Created, ErrorBody, NoContent};
use crate::state::AppState;

/// Register a new account
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created", body = UserResponse),
        (status = 400, description = "Invalid input", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody)
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SignupRequest>,
) -> ApiResult<Created<Json<UserResponse>>> {
    let response = AuthService::new(state.service_context())
        .signup(request)
        .await?;
    Ok(Created(Json(response)))
}

/// Exchange email and password for a token pair
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Token pair", body = TokenResponse),
        (status = 401, description = "Invalid credentials or unconfirmed email", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedForm(form): ValidatedForm<LoginForm>,
) -> ApiResult<Json<TokenResponse>> {
    let response = AuthService::new(state.service_context()).login(form).await?;
    Ok(Json(response))
}

/// Rotate the token pair using the refresh token as bearer
#[utoipa::path(
    get,
    path = "/auth/refresh_token",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "New token pair", body = TokenResponse),
        (status = 401, description = "Invalid refresh token", body = ErrorBody)
    )
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> ApiResult<Json<TokenResponse>> {
    let response = AuthService::new(state.service_context())
        .refresh(&token)
        .await?;
    Ok(Json(response))
}

/// Invalidate the stored refresh token
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Not authenticated", body = ErrorBody)
    )
)]
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> ApiResult<NoContent> {
    AuthService::new(state.service_context())
        .logout(auth.user_id)
        .await?;
    Ok(NoContent)
}

/// Send a new confirmation email
#[utoipa::path(
    post,
    path = "/auth/request_email",
    tag = "auth",
    request_body = EmailRequest,
    responses((status = 200, description = "Request accepted", body = MessageResponse))
)]
pub async fn request_email(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<EmailRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let response = AuthService::new(state.service_context())
        .request_email(&request.email)
        .await?;
    Ok(Json(response))
}

/// Confirm an email address
#[utoipa::path(
    get,
    path = "/auth/confirmed_email/{token}",
    tag = "auth",
    params(("token" = String, Path, description = "Email confirmation token")),
    responses(
        (status = 200, description = "Email confirmed", body = MessageResponse),
        (status = 400, description = "Invalid token", body = ErrorBody)
    )
)]
pub async fn confirmed_email(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let response = AuthService::new(state.service_context())
        .confirm_email(&token)
        .await?;
    Ok(Json(response))
}
