//! PostgreSQL implementation of access-log repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::AccessLog;
use crate::domain::repositories::AccessLogRepository;
use crate::error::AppError;

/// PostgreSQL repository for append-only access logs.
pub struct PgAccessLogRepository {
    pool: Arc<PgPool>,
}

impl PgAccessLogRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccessLogRepository for PgAccessLogRepository {
    /// A retry whose earlier attempt already committed is a no-op.
    async fn insert(&self, log: &AccessLog) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO access_logs
                (id, created_at, updated_at, path, origin_ip, http_method, referer, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(log.id)
        .bind(log.created_at)
        .bind(log.updated_at)
        .bind(&log.path)
        .bind(&log.origin_ip)
        .bind(&log.http_method)
        .bind(log.referer.as_deref())
        .bind(log.status.as_str())
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
