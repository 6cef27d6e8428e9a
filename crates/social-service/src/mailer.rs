//! Outgoing email.
//!
//! Services talk to a [`Mailer`] and never block a request on delivery:
//! messages are handed to [`spawn_send`], which runs the send on its own task
//! and only logs failures. [`LogMailer`] is the default transport and writes
//! each message to the log instead of delivering it.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// A plain-text email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl EmailMessage {
    /// Email confirmation message carrying the confirmation link
    pub fn confirmation(to: &str, username: &str, link: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "Confirm your email".to_string(),
            body: format!(
                "Hi {username},\n\nPlease confirm your email address by opening the link below:\n{link}\n\nIf you did not sign up, ignore this email."
            ),
        }
    }

    /// Password reset message carrying the reset link
    pub fn password_reset(to: &str, username: &str, link: &str) -> Self {
        Self {
            to: to.to_string(),
            subject: "Reset your password".to_string(),
            body: format!(
                "Hi {username},\n\nUse the link below to choose a new password:\n{link}\n\nIf you did not request a reset, ignore this email."
            ),
        }
    }
}

/// Mail transport
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: EmailMessage) -> anyhow::Result<()>;
}

/// Transport that only logs messages
#[derive(Debug, Clone)]
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: EmailMessage) -> anyhow::Result<()> {
        info!(
            from = %self.from,
            to = %message.to,
            subject = %message.subject,
            body = %message.body,
            "Email sent (log transport)"
        );
        Ok(())
    }
}

/// Send a message on a background task, logging failures
pub fn spawn_send(mailer: Arc<dyn Mailer>, message: EmailMessage) -> JoinHandle<()> {
    tokio::spawn(async move {
        let to = message.to.clone();
        if let Err(e) = mailer.send(message).await {
            warn!(to = %to, error = %e, "Failed to send email");
        }
    })
}

/// Link opened to confirm an email address
pub fn confirmation_link(base_url: &str, token: &str) -> String {
    format!("{}/auth/confirmed_email/{token}", base_url.trim_end_matches('/'))
}

/// Link opened to reset a password
pub fn reset_password_link(base_url: &str, token: &str) -> String {
    format!(
        "{}/api/users/reset_password/{token}",
        base_url.trim_end_matches('/')
    )
}
