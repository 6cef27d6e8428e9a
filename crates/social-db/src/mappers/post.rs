//! Post model -> entity mapper

use social_core::entities::Post;

use crate::models::PostModel;

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: model.id,
            user_id: model.user_id,
            post: model.post,
            likes: model.likes,
            dislikes: model.dislikes,
            created_at: model.created_at,
        }
    }
}
