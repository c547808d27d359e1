//! Reaction handlers
//!
//! Endpoints for message reactions.

use axum::{extract::State, Json};
use vanish_service::{ReactRequest, ReactionService, ReactionSummaryResponse};

use crate::extractors::{MessageIdPath, OptionalAuthUser, SnowflakePath, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Like or dislike a message
///
/// POST /messages/{message_id}/reactions
///
/// Anonymous callers get 401 from the service.
pub async fn react_to_message(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    SnowflakePath(path): SnowflakePath<MessageIdPath>,
    ValidatedJson(request): ValidatedJson<ReactRequest>,
) -> ApiResult<Json<ReactionSummaryResponse>> {
    let message_id = path.message_id()?;

    let service = ReactionService::new(state.service_context());
    let summary = service.react(message_id, auth.user_id(), request).await?;
    Ok(Json(summary))
}
