//! Reaction service
//!
//! Likes and dislikes. A user holds at most one reaction per message;
//! reacting again overwrites it.

use futures::future::try_join;
use tracing::{info, instrument, warn};
use vanish_core::{DomainError, Reaction, Snowflake};

use crate::dto::{ReactRequest, ReactionSummaryResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Reaction service
pub struct ReactionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReactionService<'a> {
    /// Create a new ReactionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// React to a message and return the fresh totals
    ///
    /// # Errors
    /// - `Unauthorized` without a caller
    /// - `NotFound` when the message is gone or already expired, including
    ///   when a sweep removes it between the check and the write
    #[instrument(skip(self))]
    pub async fn react(
        &self,
        message_id: Snowflake,
        user_id: Option<Snowflake>,
        request: ReactRequest,
    ) -> ServiceResult<ReactionSummaryResponse> {
        let user_id = user_id.ok_or(ServiceError::Unauthorized)?;
        let now = self.ctx.now();

        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .filter(|message| message.is_active(now))
            .ok_or_else(|| ServiceError::not_found("Message", message_id.to_string()))?;

        let reaction = Reaction::new(message.id, user_id, request.kind, now);
        match self.ctx.reaction_repo().upsert(&reaction).await {
            Ok(()) => {}
            Err(DomainError::MessageNotFound(id)) => {
                warn!(message_id = %id, "Message vanished before the reaction was stored");
                return Err(ServiceError::not_found("Message", id.to_string()));
            }
            Err(e) => return Err(e.into()),
        }

        info!(
            message_id = %message_id,
            user_id = %user_id,
            kind = %request.kind,
            "Reaction stored"
        );

        let reactions = self.ctx.reaction_repo();
        let (counts, own) = try_join(
            reactions.counts(message_id),
            reactions.find_kind(message_id, user_id),
        )
        .await?;

        Ok(ReactionSummaryResponse::new(counts, own))
    }
}
