//! Message handlers
//!
//! Posting, the public feed, and deletion.

use axum::{extract::State, Json};
use vanish_service::{
    CreateMessageRequest, EnrichedMessageResponse, MessageResponse, MessageService,
    SuccessResponse,
};

use crate::extractors::{MessageIdPath, OptionalAuthUser, SnowflakePath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Post a message, signed in or anonymously
///
/// POST /messages
pub async fn create_message(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
    ValidatedJson(request): ValidatedJson<CreateMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let message = service.post_message(auth.user_id(), request).await?;
    Ok(Created(Json(message)))
}

/// Active messages with reaction totals
///
/// GET /messages
pub async fn list_messages(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
) -> ApiResult<Json<Vec<EnrichedMessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let messages = service.list_with_engagement(auth.user_id()).await?;
    Ok(Json(messages))
}

/// Delete a message
///
/// DELETE /messages/{message_id}
pub async fn delete_message(
    State(state): State<AppState>,
    SnowflakePath(path): SnowflakePath<MessageIdPath>,
) -> ApiResult<Json<SuccessResponse>> {
    let message_id = path.message_id()?;

    let service = MessageService::new(state.service_context());
    let result = service.remove_message(message_id).await?;
    Ok(Json(result))
}
