//! Message model -> entity mapper

use vanish_core::{Message, Snowflake};

use crate::models::MessageModel;

impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: Snowflake::new(model.id),
            content: model.content,
            author_id: model.author_id.map(Snowflake::new),
            created_at: model.created_at,
            expires_at: model.expires_at,
        }
    }
}
