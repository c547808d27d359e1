//! Dashboard handlers
//!
//! The signed-in user's own history, notification preferences, and reminders.

use axum::{extract::State, Json};
use vanish_service::{
    MessageResponse, MessageService, PreferenceService, PreferencesResponse, ReminderResponse,
    SuccessResponse, UpdatePreferencesRequest,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::ApiResult;
use crate::state::AppState;

/// Everything the caller has posted, including expired messages not yet swept
///
/// GET /dashboard/messages
pub async fn get_my_messages(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let messages = service.user_messages(auth.user_id).await?;
    Ok(Json(messages))
}

/// GET /dashboard/preferences
pub async fn get_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<PreferencesResponse>> {
    let service = PreferenceService::new(state.service_context());
    let prefs = service.get_preferences(auth.user_id).await?;
    Ok(Json(prefs))
}

/// PUT /dashboard/preferences
pub async fn update_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdatePreferencesRequest>,
) -> ApiResult<Json<SuccessResponse>> {
    let service = PreferenceService::new(state.service_context());
    let result = service.update_preferences(auth.user_id, request).await?;
    Ok(Json(result))
}

/// Messages whose reminder window is open
///
/// GET /dashboard/reminders
pub async fn get_reminders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ReminderResponse>>> {
    let service = PreferenceService::new(state.service_context());
    let reminders = service.expiring_soon(auth.user_id).await?;
    Ok(Json(reminders))
}
