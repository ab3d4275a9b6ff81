use social_core::entities::Comment;
use social_core::value_objects::Snowflake;

use crate::models::CommentModel;

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: Snowflake::new(model.id),
            post_id: Snowflake::new(model.post_id),
            author_id: Snowflake::new(model.author_id),
            text: model.text,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
