//! UserPreference entity - per-user expiration reminder settings

use chrono::{DateTime, Duration, Utc};

use crate::entities::Message;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Notification preferences, one record per user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPreference {
    pub user_id: Snowflake,
    pub notifications_enabled: bool,
    pub notify_before_minutes: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserPreference {
    pub const DEFAULT_NOTIFICATIONS_ENABLED: bool = true;
    pub const DEFAULT_NOTIFY_BEFORE_MINUTES: i32 = 60;
    pub const MIN_NOTIFY_BEFORE_MINUTES: i32 = 5;
    pub const MAX_NOTIFY_BEFORE_MINUTES: i32 = 1440;

    /// Record created on first access
    pub fn with_defaults(user_id: Snowflake, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            notifications_enabled: Self::DEFAULT_NOTIFICATIONS_ENABLED,
            notify_before_minutes: Self::DEFAULT_NOTIFY_BEFORE_MINUTES,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply new settings in place
    ///
    /// # Errors
    /// Returns `DomainError::NotifyBeforeOutOfRange` (and leaves the record
    /// untouched) when `notify_before_minutes` is outside 5..=1440.
    pub fn apply(
        &mut self,
        notifications_enabled: bool,
        notify_before_minutes: i32,
        now: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        validate_notify_before(notify_before_minutes)?;
        self.notifications_enabled = notifications_enabled;
        self.notify_before_minutes = notify_before_minutes;
        self.updated_at = now;
        Ok(())
    }

    #[inline]
    pub fn notify_before(&self) -> Duration {
        Duration::minutes(i64::from(self.notify_before_minutes))
    }

    /// Instant at which the reminder for `message` becomes due
    pub fn reminder_at(&self, message: &Message) -> DateTime<Utc> {
        message.expires_at - self.notify_before()
    }

    /// Reminder policy: enabled, and `now` falls in
    /// `[expires_at - notify_before, expires_at)`
    pub fn reminder_due(&self, message: &Message, now: DateTime<Utc>) -> bool {
        self.notifications_enabled && message.is_active(now) && now >= self.reminder_at(message)
    }
}

/// Validate the reminder lead time
///
/// # Errors
/// Returns `DomainError::NotifyBeforeOutOfRange` when outside 5..=1440.
pub fn validate_notify_before(minutes: i32) -> Result<(), DomainError> {
    if (UserPreference::MIN_NOTIFY_BEFORE_MINUTES..=UserPreference::MAX_NOTIFY_BEFORE_MINUTES)
        .contains(&minutes)
    {
        Ok(())
    } else {
        Err(DomainError::NotifyBeforeOutOfRange {
            minutes,
            min: UserPreference::MIN_NOTIFY_BEFORE_MINUTES,
            max: UserPreference::MAX_NOTIFY_BEFORE_MINUTES,
        })
    }
}
