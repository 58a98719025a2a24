//! PostgreSQL implementation of ExpertProfileRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use hub_core::entities::ExpertProfile;
use hub_core::traits::{ExpertProfileRepository, RepoResult};
use hub_core::value_objects::ExpertStatus;

use crate::models::ExpertProfileModel;

use super::error::map_db_error;

/// PostgreSQL implementation of ExpertProfileRepository
#[derive(Clone)]
pub struct PgExpertProfileRepository {
    pool: PgPool,
}

impl PgExpertProfileRepository {
    /// Create a new PgExpertProfileRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a fresh application. Applications are submitted elsewhere;
    /// this exists for seeding and tests.
    #[instrument(skip(self, expert), fields(expert_profile_id = %expert.id))]
    pub async fn insert(&self, expert: &ExpertProfile) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO expert_profiles (id, user_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(expert.id)
        .bind(expert.user_id)
        .bind(expert.status.as_str())
        .bind(expert.created_at)
        .bind(expert.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}

#[async_trait]
impl ExpertProfileRepository for PgExpertProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<ExpertProfile>> {
        let result = sqlx::query_as::<_, ExpertProfileModel>(
            r"
            SELECT id, user_id, status, verified_at, verified_by, rejection_reason,
                   created_at, updated_at
            FROM expert_profiles
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(ExpertProfile::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn approve(
        &self,
        id: Uuid,
        verified_by: Uuid,
        verified_at: DateTime<Utc>,
    ) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE expert_profiles
            SET status = $4, verified_by = $2, verified_at = $3,
                rejection_reason = NULL, updated_at = NOW()
            WHERE id = $1 AND status = $5
            ",
        )
        .bind(id)
        .bind(verified_by)
        .bind(verified_at)
        .bind(ExpertStatus::Approved.as_str())
        .bind(ExpertStatus::PendingReview.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self, reason))]
    async fn reject(&self, id: Uuid, reason: &str) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE expert_profiles
            SET status = $3, rejection_reason = $2, updated_at = NOW()
            WHERE id = $1 AND status = $4
            ",
        )
        .bind(id)
        .bind(reason)
        .bind(ExpertStatus::Rejected.as_str())
        .bind(ExpertStatus::PendingReview.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
