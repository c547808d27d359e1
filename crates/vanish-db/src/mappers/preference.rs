//! Preference model -> entity mapper

use vanish_core::{Snowflake, UserPreference};

use crate::models::PreferenceModel;

impl From<PreferenceModel> for UserPreference {
    fn from(model: PreferenceModel) -> Self {
        UserPreference {
            user_id: Snowflake::new(model.user_id),
            notifications_enabled: model.notifications_enabled,
            notify_before_minutes: model.notify_before_minutes,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
