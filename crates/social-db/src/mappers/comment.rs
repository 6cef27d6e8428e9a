//! Comment model -> entity mapper

use social_core::entities::Comment;

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: model.id,
            post_id: model.post_id,
            user_id: model.user_id,
            comment: model.comment,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
