//! Message service
//!
//! Handles posting, the engagement-enriched public listing, deletion, and
//! an author's history.

use futures::future::{try_join, try_join_all};
use tracing::{info, instrument};
use vanish_core::{Message, ReactionCounts, Snowflake};

use crate::dto::{
    CreateMessageRequest, EnrichedMessage, EnrichedMessageResponse, MessageResponse,
    SuccessResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Post a message, anonymously or as `author_id`
    ///
    /// One clock reading stamps both `created_at` and `expires_at`.
    #[instrument(skip(self, request))]
    pub async fn post_message(
        &self,
        author_id: Option<Snowflake>,
        request: CreateMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let now = self.ctx.now();
        let message = Message::new(self.ctx.generate_id(), request.content, author_id, now)?;

        self.ctx.message_repo().create(&message).await?;

        info!(
            message_id = %message.id,
            anonymous = message.is_anonymous(),
            expires_at = %message.expires_at,
            "Message posted"
        );

        Ok(MessageResponse::at(&message, now))
    }

    /// Active messages, newest first, each with its reaction totals and the
    /// viewer's own reaction
    #[instrument(skip(self))]
    pub async fn list_with_engagement(
        &self,
        viewer_id: Option<Snowflake>,
    ) -> ServiceResult<Vec<EnrichedMessageResponse>> {
        let now = self.ctx.now();
        let messages = self.ctx.message_repo().find_active(now).await?;

        // try_join_all keeps input order
        let enriched = try_join_all(messages.into_iter().map(|message| self.enrich(message, viewer_id)))
            .await?;

        Ok(enriched
            .into_iter()
            .map(|item| item.into_response(now))
            .collect())
    }

    async fn enrich(
        &self,
        message: Message,
        viewer_id: Option<Snowflake>,
    ) -> ServiceResult<EnrichedMessage> {
        let reactions = self.ctx.reaction_repo();
        let counts = reactions.counts(message.id);
        let own = async {
            match viewer_id {
                Some(user_id) => reactions.find_kind(message.id, user_id).await,
                None => Ok(None),
            }
        };

        let (counts, user_reaction): (ReactionCounts, _) = try_join(counts, own).await?;

        Ok(EnrichedMessage {
            message,
            counts,
            user_reaction,
        })
    }

    /// Delete a message by id
    ///
    /// A missing id is not an error: the response reports `success: false`.
    #[instrument(skip(self))]
    pub async fn remove_message(&self, message_id: Snowflake) -> ServiceResult<SuccessResponse> {
        let removed = self.ctx.message_repo().delete(message_id).await?;

        if removed {
            info!(message_id = %message_id, "Message deleted");
        }

        Ok(SuccessResponse::new(removed))
    }

    /// Everything `user_id` has posted, expired or not, newest first
    #[instrument(skip(self))]
    pub async fn user_messages(&self, user_id: Snowflake) -> ServiceResult<Vec<MessageResponse>> {
        let now = self.ctx.now();
        let messages = self.ctx.message_repo().find_by_author(user_id).await?;

        Ok(messages
            .iter()
            .map(|message| MessageResponse::at(message, now))
            .collect())
    }
}
