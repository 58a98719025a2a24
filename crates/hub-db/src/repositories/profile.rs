//! PostgreSQL implementation of ProfileRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use hub_core::entities::{OnboardingAnswers, Profile};
use hub_core::error::DomainError;
use hub_core::traits::{ProfileRepository, RepoResult};
use hub_core::value_objects::{ApprovalStatus, Role};

use crate::models::ProfileModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of ProfileRepository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new PgProfileRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Uuid) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(
            r"
            SELECT id, email, full_name, avatar_url, company_name, role, approval_status,
                   onboarding_completed, rejection_reason, region, industry, level,
                   created_at, updated_at
            FROM profiles
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Profile::try_from).transpose()
    }

    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    async fn create(&self, profile: &Profile) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO profiles (id, email, full_name, avatar_url, company_name, role,
                                  approval_status, onboarding_completed, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(profile.id)
        .bind(&profile.email)
        .bind(&profile.full_name)
        .bind(&profile.avatar_url)
        .bind(&profile.company_name)
        .bind(profile.role.as_str())
        .bind(profile.approval_status.as_str())
        .bind(profile.onboarding_completed)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::ProfileAlreadyExists(profile.id)))?;

        Ok(())
    }

    #[instrument(skip(self, rejection_reason))]
    async fn transition_status(
        &self,
        id: Uuid,
        from: ApprovalStatus,
        to: ApprovalStatus,
        rejection_reason: Option<&str>,
    ) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE profiles
            SET approval_status = $3, rejection_reason = $4, updated_at = NOW()
            WHERE id = $1 AND approval_status = $2
            ",
        )
        .bind(id)
        .bind(from.as_str())
        .bind(to.as_str())
        .bind(rejection_reason)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn auto_approve(&self, id: Uuid) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE profiles
            SET approval_status = $2, rejection_reason = NULL, updated_at = NOW()
            WHERE id = $1 AND approval_status <> $2
            ",
        )
        .bind(id)
        .bind(ApprovalStatus::Approved.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn promote_to_expert(&self, id: Uuid) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE profiles
            SET role = $2, updated_at = NOW()
            WHERE id = $1 AND role = $3
            ",
        )
        .bind(id)
        .bind(Role::Expert.as_str())
        .bind(Role::Member.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self, answers))]
    async fn complete_onboarding(&self, id: Uuid, answers: &OnboardingAnswers) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE profiles
            SET region = $2, industry = $3, level = $4,
                company_name = COALESCE($5, company_name),
                onboarding_completed = TRUE, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id)
        .bind(&answers.region)
        .bind(&answers.industry)
        .bind(&answers.level)
        .bind(&answers.company_name)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM profiles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
