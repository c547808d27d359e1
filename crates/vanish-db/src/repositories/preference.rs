//! PostgreSQL implementation of PreferenceRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use vanish_core::traits::{PreferenceRepository, RepoResult};
use vanish_core::{validate_notify_before, Snowflake, UserPreference};

use crate::models::PreferenceModel;

use super::error::map_db_error;

/// PostgreSQL implementation of PreferenceRepository
#[derive(Clone)]
pub struct PgPreferenceRepository {
    pool: PgPool,
}

impl PgPreferenceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PreferenceRepository for PgPreferenceRepository {
    #[instrument(skip(self))]
    async fn get_or_create(
        &self,
        user_id: Snowflake,
        now: DateTime<Utc>,
    ) -> RepoResult<UserPreference> {
        // The no-op update makes RETURNING yield the existing row on conflict
        let defaults = UserPreference::with_defaults(user_id, now);
        let result = sqlx::query_as::<_, PreferenceModel>(
            r#"
            INSERT INTO user_preferences
                (user_id, notifications_enabled, notify_before_minutes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
            RETURNING user_id, notifications_enabled, notify_before_minutes, created_at, updated_at
            "#,
        )
        .bind(user_id.into_inner())
        .bind(defaults.notifications_enabled)
        .bind(defaults.notify_before_minutes)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into())
    }

    #[instrument(skip(self))]
    async fn update(
        &self,
        user_id: Snowflake,
        notifications_enabled: bool,
        notify_before_minutes: i32,
        now: DateTime<Utc>,
    ) -> RepoResult<UserPreference> {
        validate_notify_before(notify_before_minutes)?;

        let result = sqlx::query_as::<_, PreferenceModel>(
            r#"
            INSERT INTO user_preferences
                (user_id, notifications_enabled, notify_before_minutes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            ON CONFLICT (user_id) DO UPDATE SET
                notifications_enabled = EXCLUDED.notifications_enabled,
                notify_before_minutes = EXCLUDED.notify_before_minutes,
                updated_at = EXCLUDED.updated_at
            RETURNING user_id, notifications_enabled, notify_before_minutes, created_at, updated_at
            "#,
        )
        .bind(user_id.into_inner())
        .bind(notifications_enabled)
        .bind(notify_before_minutes)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into())
    }
}
