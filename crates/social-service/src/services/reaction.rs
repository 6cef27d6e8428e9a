//! Reaction service
//!
//! Likes and dislikes. The repository stores the reaction row and adjusts the
//! post counters in one transaction, so the service only maps outcomes.

use social_core::entities::{ReactionChange, ReactionKind};
use tracing::{info, instrument};

use crate::dto::ReactionResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Like a post, switching an existing dislike
    pub async fn like(&self, post_id: i64, user_id: i64) -> ServiceResult<ReactionResponse> {
        self.react(post_id, user_id, ReactionKind::Like).await
    }

    /// Dislike a post, switching an existing like
    pub async fn dislike(&self, post_id: i64, user_id: i64) -> ServiceResult<ReactionResponse> {
        self.react(post_id, user_id, ReactionKind::Dislike).await
    }

    #[instrument(skip(self))]
    async fn react(
        &self,
        post_id: i64,
        user_id: i64,
        kind: ReactionKind,
    ) -> ServiceResult<ReactionResponse> {
        let outcome = self.ctx.reaction_repo().react(post_id, user_id, kind).await?;

        match outcome.change {
            ReactionChange::Switched => {
                info!(post_id = %post_id, user_id = %user_id, reaction = %kind, "Reaction switched");
            }
            _ => info!(post_id = %post_id, user_id = %user_id, reaction = %kind, "Reaction added"),
        }

        Ok(ReactionResponse::from(outcome))
    }

    /// Withdraw the caller's reaction
    #[instrument(skip(self))]
    pub async fn remove_reaction(
        &self,
        post_id: i64,
        user_id: i64,
    ) -> ServiceResult<ReactionResponse> {
        let outcome = self.ctx.reaction_repo().remove(post_id, user_id).await?;

        info!(post_id = %post_id, user_id = %user_id, "Reaction removed");

        Ok(ReactionResponse::from(outcome))
    }
}
