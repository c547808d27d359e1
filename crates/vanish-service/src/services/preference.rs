//! Preference service
//!
//! Dashboard operations on the caller's own notification settings, plus the
//! reminder feed built from them.

use tracing::{debug, info, instrument};
use vanish_core::Snowflake;

use crate::dto::{PreferencesResponse, ReminderResponse, SuccessResponse, UpdatePreferencesRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Preference service
pub struct PreferenceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PreferenceService<'a> {
    /// Create a new PreferenceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Current settings, created with defaults on first access
    #[instrument(skip(self))]
    pub async fn get_preferences(&self, user_id: Snowflake) -> ServiceResult<PreferencesResponse> {
        let pref = self
            .ctx
            .preference_repo()
            .get_or_create(user_id, self.ctx.now())
            .await?;

        Ok(pref.into())
    }

    /// Replace the caller's settings
    ///
    /// # Errors
    /// Returns a validation error, without writing, when
    /// `notify_before_minutes` is outside 5..=1440.
    #[instrument(skip(self))]
    pub async fn update_preferences(
        &self,
        user_id: Snowflake,
        request: UpdatePreferencesRequest,
    ) -> ServiceResult<SuccessResponse> {
        let pref = self
            .ctx
            .preference_repo()
            .update(
                user_id,
                request.notifications_enabled,
                request.notify_before_minutes,
                self.ctx.now(),
            )
            .await?;

        info!(
            user_id = %user_id,
            notifications_enabled = pref.notifications_enabled,
            notify_before_minutes = pref.notify_before_minutes,
            "Preferences updated"
        );

        Ok(SuccessResponse::ok())
    }

    /// The caller's active messages whose reminder window has opened,
    /// newest first
    #[instrument(skip(self))]
    pub async fn expiring_soon(&self, user_id: Snowflake) -> ServiceResult<Vec<ReminderResponse>> {
        let now = self.ctx.now();
        let pref = self.ctx.preference_repo().get_or_create(user_id, now).await?;

        if !pref.notifications_enabled {
            debug!(user_id = %user_id, "Notifications disabled, no reminders");
            return Ok(Vec::new());
        }

        let messages = self.ctx.message_repo().find_by_author(user_id).await?;

        Ok(messages
            .iter()
            .filter(|message| pref.reminder_due(message, now))
            .map(|message| ReminderResponse::at(message, &pref, now))
            .collect())
    }
}
