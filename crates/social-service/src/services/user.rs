//! User service
//!
//! Profile reads, password reset by email, and activity timestamps.

use social_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{ActivityResponse, CurrentUserResponse, MessageResponse, ResetPasswordRequest};
use crate::mailer::{reset_password_link, spawn_send, EmailMessage};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

pub const RESET_EMAIL_SENT: &str = "Email for reset password sent successfully";
pub const PASSWORD_RESET: &str = "Password reset successfully";
pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";
pub const PASSWORD_RESET_ERROR: &str = "Password reset error";

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the authenticated user
    #[instrument(skip(self))]
    pub async fn get_me(&self, user_id: i64) -> ServiceResult<CurrentUserResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        Ok(CurrentUserResponse::from(user))
    }

    /// Send a password reset link. The answer is the same whether or not the
    /// address belongs to an account.
    #[instrument(skip(self))]
    pub async fn request_password_reset(&self, email: &str) -> ServiceResult<MessageResponse> {
        if let Some(user) = self.ctx.user_repo().find_by_email(email).await? {
            let token = self
                .ctx
                .jwt_service()
                .generate_password_reset_token(&user.email)?;
            let link = reset_password_link(&self.ctx.settings().public_base_url, &token);

            spawn_send(
                self.ctx.mailer(),
                EmailMessage::password_reset(&user.email, &user.username, &link),
            );
            info!(user_id = %user.id, "Password reset email queued");
        }

        Ok(MessageResponse::new(RESET_EMAIL_SENT))
    }

    /// Set a new password using a reset token
    #[instrument(skip(self, token, request))]
    pub async fn reset_password(
        &self,
        token: &str,
        request: ResetPasswordRequest,
    ) -> ServiceResult<MessageResponse> {
        if request.new_password != request.r_new_password {
            return Err(ServiceError::validation(PASSWORDS_DO_NOT_MATCH));
        }

        let email = self
            .ctx
            .jwt_service()
            .validate_password_reset_token(token)
            .map_err(|_| ServiceError::validation(PASSWORD_RESET_ERROR))?;

        let user = self
            .ctx
            .user_repo()
            .find_by_email(&email)
            .await?
            .ok_or_else(|| DomainError::EmailNotFound(email.clone()))?;

        let password_hash = self
            .ctx
            .password_service()
            .hash_async(request.new_password)
            .await?;

        self.ctx
            .user_repo()
            .update_password(user.id, &password_hash)
            .await?;
        // Sessions opened with the old password end here
        self.ctx.user_repo().set_refresh_token(user.id, None).await?;

        info!(user_id = %user.id, "Password reset");

        Ok(MessageResponse::new(PASSWORD_RESET))
    }

    /// Last login and last request times of any user
    #[instrument(skip(self))]
    pub async fn get_activity(&self, user_id: i64) -> ServiceResult<ActivityResponse> {
        let activity = self
            .ctx
            .user_repo()
            .get_activity(user_id)
            .await?
            .ok_or(DomainError::UserNotFound(user_id))?;

        Ok(ActivityResponse::from(activity))
    }

    /// Record that the user just made a request
    pub async fn touch_last_request(&self, user_id: i64) -> ServiceResult<()> {
        self.ctx.user_repo().touch_last_request(user_id).await?;
        Ok(())
    }
}
