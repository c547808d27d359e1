//! PostgreSQL implementation of ReactionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use vanish_core::traits::{ReactionRepository, RepoResult};
use vanish_core::{DomainError, Reaction, ReactionCounts, ReactionKind, Snowflake};

use crate::models::{ReactionCountsModel, ReactionModel};

use super::error::{map_db_error, map_foreign_key_violation};

/// PostgreSQL implementation of ReactionRepository
#[derive(Clone)]
pub struct PgReactionRepository {
    pool: PgPool,
}

impl PgReactionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Full reaction row, with timestamps
    #[instrument(skip(self))]
    pub async fn find(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<Reaction>> {
        let result = sqlx::query_as::<_, ReactionModel>(
            r#"
            SELECT message_id, user_id, kind, created_at, updated_at
            FROM reactions
            WHERE message_id = $1 AND user_id = $2
            "#,
        )
        .bind(message_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Reaction::try_from).transpose()
    }
}

#[async_trait]
impl ReactionRepository for PgReactionRepository {
    #[instrument(skip(self, reaction), fields(message_id = %reaction.message_id, user_id = %reaction.user_id, kind = %reaction.kind))]
    async fn upsert(&self, reaction: &Reaction) -> RepoResult<()> {
        sqlx::query(
            r#"
            INSERT INTO reactions (message_id, user_id, kind, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (message_id, user_id)
            DO UPDATE SET kind = EXCLUDED.kind, updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(reaction.message_id.into_inner())
        .bind(reaction.user_id.into_inner())
        .bind(reaction.kind.as_str())
        .bind(reaction.created_at)
        .bind(reaction.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_foreign_key_violation(e, || DomainError::MessageNotFound(reaction.message_id))
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn counts(&self, message_id: Snowflake) -> RepoResult<ReactionCounts> {
        let result = sqlx::query_as::<_, ReactionCountsModel>(
            r#"
            SELECT
                COUNT(*) FILTER (WHERE kind = 'like') AS likes,
                COUNT(*) FILTER (WHERE kind = 'dislike') AS dislikes
            FROM reactions
            WHERE message_id = $1
            "#,
        )
        .bind(message_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.into())
    }

    #[instrument(skip(self))]
    async fn find_kind(
        &self,
        message_id: Snowflake,
        user_id: Snowflake,
    ) -> RepoResult<Option<ReactionKind>> {
        let kind = sqlx::query_scalar::<_, String>(
            r#"
            SELECT kind FROM reactions WHERE message_id = $1 AND user_id = $2
            "#,
        )
        .bind(message_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        kind.map(|k| k.parse()).transpose()
    }
}
