//! Authentication service
//!
//! Handles signup, login, token refresh and logout, plus email confirmation.
//! The one valid refresh token of a user is stored on the user row; presenting
//! any other refresh token revokes it.

use social_common::AppError;
use social_core::entities::{NewUser, User};
use social_core::DomainError;
use tracing::{info, instrument, warn};

use crate::dto::{LoginForm, MessageResponse, SignupRequest, TokenResponse, UserResponse};
use crate::mailer::{confirmation_link, spawn_send, EmailMessage};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub const CHECK_EMAIL_CONFIRMATION: &str = "Check your email for confirmation.";
pub const EMAIL_ALREADY_CONFIRMED: &str = "Your email is already confirmed";
pub const EMAIL_CONFIRMED: &str = "Email confirmed";
pub const VERIFICATION_ERROR: &str = "Verification error";
pub const INVALID_EMAIL_TOKEN: &str = "Invalid token for email verification";

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user and send the confirmation email
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn signup(&self, request: SignupRequest) -> ServiceResult<UserResponse> {
        if self.ctx.user_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }

        let password_hash = self
            .ctx
            .password_service()
            .hash_async(request.password)
            .await?;

        let user = self
            .ctx
            .user_repo()
            .create(&NewUser::new(request.username, request.email, password_hash))
            .await?;

        info!(user_id = %user.id, "User registered successfully");

        self.send_confirmation(&user)?;

        Ok(UserResponse::from(&user))
    }

    /// Login with email and password
    #[instrument(skip(self, form), fields(email = %form.username))]
    pub async fn login(&self, form: LoginForm) -> ServiceResult<TokenResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_email(&form.username)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::App(AppError::InvalidCredentials)
            })?;

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await?
            .ok_or(ServiceError::App(AppError::InvalidCredentials))?;

        if let Err(e) = self
            .ctx
            .password_service()
            .verify_async(form.password, password_hash)
            .await
        {
            warn!(user_id = %user.id, "Login failed: invalid password");
            return Err(e.into());
        }

        if !user.is_active {
            warn!(user_id = %user.id, "Login failed: account inactive");
            return Err(ServiceError::App(AppError::InvalidCredentials));
        }

        if !user.can_login(self.ctx.settings().auth.require_email_confirmation) {
            return Err(ServiceError::App(AppError::EmailNotConfirmed));
        }

        self.ctx.user_repo().record_login(user.id).await?;

        info!(user_id = %user.id, "User logged in successfully");

        self.issue_tokens(user.id).await
    }

    /// Exchange the stored refresh token for a new token pair
    #[instrument(skip(self, refresh_token))]
    pub async fn refresh(&self, refresh_token: &str) -> ServiceResult<TokenResponse> {
        let claims = self.ctx.jwt_service().validate_refresh_token(refresh_token)?;
        let user_id = claims.user_id()?;

        let stored = self.ctx.user_repo().get_refresh_token(user_id).await?;
        if stored.as_deref() != Some(refresh_token) {
            // A stale token was replayed: revoke the current one as well
            self.ctx.user_repo().set_refresh_token(user_id, None).await?;
            warn!(user_id = %user_id, "Refresh token mismatch, stored token revoked");
            return Err(ServiceError::App(AppError::InvalidRefreshToken));
        }

        info!(user_id = %user_id, "Tokens refreshed successfully");

        self.issue_tokens(user_id).await
    }

    /// Logout by revoking the stored refresh token
    #[instrument(skip(self))]
    pub async fn logout(&self, user_id: i64) -> ServiceResult<()> {
        self.ctx.user_repo().set_refresh_token(user_id, None).await?;
        info!(user_id = %user_id, "User logged out successfully");
        Ok(())
    }

    /// Resend the confirmation email to an unconfirmed account
    #[instrument(skip(self))]
    pub async fn request_email(&self, email: &str) -> ServiceResult<MessageResponse> {
        match self.ctx.user_repo().find_by_email(email).await? {
            Some(user) if !user.confirmed => {
                self.send_confirmation(&user)?;
                Ok(MessageResponse::new(CHECK_EMAIL_CONFIRMATION))
            }
            _ => Ok(MessageResponse::new(EMAIL_ALREADY_CONFIRMED)),
        }
    }

    /// Mark the email carried by a confirmation token as confirmed
    #[instrument(skip(self, token))]
    pub async fn confirm_email(&self, token: &str) -> ServiceResult<MessageResponse> {
        let email = self
            .ctx
            .jwt_service()
            .validate_email_confirmation_token(token)
            .map_err(|_| ServiceError::validation(INVALID_EMAIL_TOKEN))?;

        match self.ctx.user_repo().find_by_email(&email).await? {
            Some(user) if !user.confirmed => {
                self.ctx.user_repo().confirm_email(user.id).await?;
                info!(user_id = %user.id, "Email confirmed");
                Ok(MessageResponse::new(EMAIL_CONFIRMED))
            }
            _ => Err(ServiceError::validation(VERIFICATION_ERROR)),
        }
    }

    /// Validate an access token and return the user ID
    pub fn authenticate(&self, access_token: &str) -> ServiceResult<i64> {
        let claims = self.ctx.jwt_service().validate_access_token(access_token)?;
        Ok(claims.user_id()?)
    }

    async fn issue_tokens(&self, user_id: i64) -> ServiceResult<TokenResponse> {
        let pair = self.ctx.jwt_service().generate_token_pair(user_id)?;
        self.ctx
            .user_repo()
            .set_refresh_token(user_id, Some(&pair.refresh_token))
            .await?;
        Ok(TokenResponse::from(pair))
    }

    fn send_confirmation(&self, user: &User) -> ServiceResult<()> {
        let token = self
            .ctx
            .jwt_service()
            .generate_email_confirmation_token(&user.email)?;
        let link = confirmation_link(&self.ctx.settings().public_base_url, &token);

        spawn_send(
            self.ctx.mailer(),
            EmailMessage::confirmation(&user.email, &user.username, &link),
        );
        Ok(())
    }
}
