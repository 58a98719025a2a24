//! PostgreSQL implementation of AuditLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use hub_core::entities::AuditLogEntry;
use hub_core::traits::{AuditLogRepository, RepoResult};

use crate::models::AuditLogModel;

use super::error::map_db_error;

/// PostgreSQL implementation of AuditLogRepository
///
/// The table is append-only: there is no update or delete path.
#[derive(Clone)]
pub struct PgAuditLogRepository {
    pool: PgPool,
}

impl PgAuditLogRepository {
    /// Create a new PgAuditLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Entries that mention `target_user_id`, oldest first
    #[instrument(skip(self))]
    pub async fn find_by_target(&self, target_user_id: Uuid) -> RepoResult<Vec<AuditLogEntry>> {
        let rows = sqlx::query_as::<_, AuditLogModel>(
            r"
            SELECT id, action, admin_id, target_user_id, target_type, approval_action,
                   details, created_at
            FROM audit_logs
            WHERE target_user_id = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(target_user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(AuditLogEntry::from).collect())
    }
}

#[async_trait]
impl AuditLogRepository for PgAuditLogRepository {
    #[instrument(skip(self, entry), fields(action = %entry.action, target = %entry.target_user_id))]
    async fn append(&self, entry: &AuditLogEntry) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO audit_logs (id, action, admin_id, target_user_id, target_type,
                                    approval_action, details, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(entry.id)
        .bind(&entry.action)
        .bind(entry.admin_id)
        .bind(entry.target_user_id)
        .bind(&entry.target_type)
        .bind(&entry.approval_action)
        .bind(&entry.details)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
