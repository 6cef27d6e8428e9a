//! Reaction model -> entity mapper

use social_core::entities::{PostReaction, ReactionKind};
use social_core::error::DomainError;

use crate::models::PostReactionModel;

impl TryFrom<PostReactionModel> for PostReaction {
    type Error = DomainError;

    fn try_from(model: PostReactionModel) -> Result<Self, Self::Error> {
        let kind = model.reaction.parse::<ReactionKind>().map_err(|_| {
            DomainError::DatabaseError(format!(
                "Unexpected reaction value in post_reactions: {}",
                model.reaction
            ))
        })?;

        Ok(PostReaction {
            id: model.id,
            post_id: model.post_id,
            user_id: model.user_id,
            kind,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
