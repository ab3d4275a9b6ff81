use social_core::entities::Post;
use social_core::value_objects::Snowflake;

use crate::models::PostModel;

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: Snowflake::new(model.id),
            author_id: Snowflake::new(model.author_id),
            text: model.text,
            media_url: model.media_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
